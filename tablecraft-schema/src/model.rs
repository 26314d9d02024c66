use std::fmt;

use serde::Serialize;

/// Portable column type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Auto-incrementing integer primary key
    Increments,
    /// Auto-incrementing big integer primary key
    BigIncrements,
    Integer,
    BigInteger,
    String,
    Text,
    DateTime,
    Timestamp,
    Date,
    Float,
    Decimal,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Increments => "increments",
            ColumnType::BigIncrements => "big_increments",
            ColumnType::Integer => "integer",
            ColumnType::BigInteger => "big_integer",
            ColumnType::String => "string",
            ColumnType::Text => "text",
            ColumnType::DateTime => "date_time",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Date => "date",
            ColumnType::Float => "float",
            ColumnType::Decimal => "decimal",
        }
    }

    /// Whether this is one of the identity tags.
    pub fn is_identity(&self) -> bool {
        matches!(self, ColumnType::Increments | ColumnType::BigIncrements)
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ColumnType::Increments
                | ColumnType::BigIncrements
                | ColumnType::Integer
                | ColumnType::BigInteger
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column description as reported by a backend, before normalization.
///
/// Every field except the name and native type is optional; the normalizer
/// treats absence as `false`/`None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawColumn {
    pub name: String,
    pub native_type: String,
    pub nullable: Option<bool>,
    /// `PRI` marks a primary key column
    pub key: Option<String>,
    /// `auto_increment` marks an auto-incrementing column
    pub extra: Option<String>,
    /// Default expression as the backend reports it (possibly quoted)
    pub default: Option<String>,
}

/// A normalized column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub native_type: String,
    pub column_type: ColumnType,
    pub nullable: bool,
    pub default: Option<String>,
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
    pub unsigned: bool,
    /// `varchar(N)` length
    pub length: Option<u32>,
    /// `decimal(P,S)` precision and scale
    pub precision: Option<(u32, u32)>,
}

/// Action taken on referencing rows when the referenced row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferentialAction {
    Cascade,
    SetNull,
    SetDefault,
    Restrict,
    NoAction,
}

impl ReferentialAction {
    /// Parse a rule as reported by `information_schema` or `PRAGMA foreign_key_list`.
    pub fn parse(rule: &str) -> Option<Self> {
        match rule.trim().to_ascii_uppercase().as_str() {
            "CASCADE" => Some(ReferentialAction::Cascade),
            "SET NULL" => Some(ReferentialAction::SetNull),
            "SET DEFAULT" => Some(ReferentialAction::SetDefault),
            "RESTRICT" => Some(ReferentialAction::Restrict),
            "NO ACTION" => Some(ReferentialAction::NoAction),
            _ => None,
        }
    }

    /// SQL spelling, lower-cased.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "cascade",
            ReferentialAction::SetNull => "set null",
            ReferentialAction::SetDefault => "set default",
            ReferentialAction::Restrict => "restrict",
            ReferentialAction::NoAction => "no action",
        }
    }

    /// `NO ACTION` is the absence of an action.
    pub fn is_action(&self) -> bool {
        !matches!(self, ReferentialAction::NoAction)
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-column foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    pub owning_table: String,
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
    pub constraint_name: String,
    pub on_delete: Option<ReferentialAction>,
}

impl ForeignKey {
    /// Constraint name the framework would generate for `table.column`.
    pub fn conventional_name(table: &str, column: &str) -> String {
        format!("{}_{}_foreign", table, column)
    }
}

/// A reflected table with its normalized columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Primary key columns in column order.
    pub fn primary_key(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_primary_key).collect()
    }
}
