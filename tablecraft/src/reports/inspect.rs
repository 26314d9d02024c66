//! Inspect command report data structures.

use clap::ValueEnum;
use serde_json::{Value, json};
use tablecraft_schema::{Column, Dialect, ForeignKey, Table};

use super::output::{Output, Report};

/// How `inspect` prints the schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum InspectFormat {
    #[default]
    Text,
    Json,
}

/// The reflected, normalized schema.
#[derive(Debug)]
pub struct InspectReport {
    pub dialect: Dialect,
    pub tables: Vec<Table>,
    /// Tables left out because of `global.ignore_tables`
    pub ignored: Vec<String>,
}

impl InspectReport {
    pub fn to_json(&self) -> Value {
        json!({
            "dialect": self.dialect,
            "tables": self.tables,
            "ignored": self.ignored,
        })
    }
}

fn describe_column(column: &Column) -> String {
    let mut text = format!(
        "{} {} ({})",
        column.name, column.column_type, column.native_type
    );
    if column.is_primary_key {
        text.push_str(" primary");
    }
    if column.nullable {
        text.push_str(" nullable");
    }
    if let Some(default) = &column.default {
        text.push_str(&format!(" default {}", default));
    }
    text
}

fn describe_foreign_key(fk: &ForeignKey) -> String {
    let mut text = format!(
        "{} -> {}.{}",
        fk.column, fk.referenced_table, fk.referenced_column
    );
    if let Some(action) = fk.on_delete.filter(|a| a.is_action()) {
        text.push_str(&format!(" on delete {}", action));
    }
    text
}

impl Report for InspectReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value("Database", self.dialect.as_str());
        out.key_value("Tables", &self.tables.len().to_string());
        if !self.ignored.is_empty() {
            out.key_value("Ignored", &self.ignored.join(", "));
        }

        for table in &self.tables {
            out.newline();
            out.section(&table.name);
            for column in &table.columns {
                out.list_item(&describe_column(column));
            }
            for fk in &table.foreign_keys {
                out.list_item(&format!("foreign key {}", describe_foreign_key(fk)));
            }
        }
    }
}
