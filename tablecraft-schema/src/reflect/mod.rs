//! Backend-specific schema reflection behind one synchronous trait.

mod mysql;
mod sqlite;

use std::fmt;

pub use mysql::MySqlReflector;
pub use sqlite::SqliteReflector;
use serde::Serialize;
use tablecraft_config::{DatabaseConfig, Driver};

use crate::{ForeignKey, RawColumn, ReflectionError, Result, Table, normalize};

/// SQL dialect of a connected database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Sqlite,
    Mysql,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Mysql => "mysql",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only access to a database's structural metadata.
pub trait SchemaReflector {
    fn dialect(&self) -> Dialect;

    /// Table names in name order, without engine-internal tables and
    /// without the names in `ignore`.
    ///
    /// Fails with [`ReflectionError::NoTables`] when the database has no
    /// tables at all.
    fn list_tables(&self, ignore: &[String]) -> Result<Vec<String>>;

    /// Raw column descriptors in declaration order.
    fn columns(&self, table: &str) -> Result<Vec<RawColumn>>;

    fn foreign_keys(&self, table: &str) -> Result<Vec<ForeignKey>>;

    /// Columns (normalized) and foreign keys of one table.
    fn reflect_table(&self, table: &str) -> Result<Table> {
        let columns: Vec<_> = self.columns(table)?.iter().map(normalize).collect();
        let foreign_keys = self.foreign_keys(table)?;

        tracing::debug!(
            table,
            columns = columns.len(),
            foreign_keys = foreign_keys.len(),
            "reflected table"
        );

        Ok(Table {
            name: table.to_string(),
            columns,
            foreign_keys,
        })
    }
}

/// Open a reflector for the configured backend.
pub fn connect(config: &DatabaseConfig) -> Result<Box<dyn SchemaReflector>> {
    let target = config
        .connection_string()
        .ok_or_else(|| ReflectionError::MissingDatabase {
            env: config.env_var().to_string(),
        })?;

    tracing::info!(driver = %config.driver, "connecting to database");

    match config.driver {
        Driver::Sqlite => Ok(Box::new(SqliteReflector::open(&target)?)),
        Driver::Mysql => Ok(Box::new(MySqlReflector::connect(&target)?)),
    }
}

/// Apply the ignore list, failing when nothing was found at all.
fn filter_tables(tables: Vec<String>, ignore: &[String]) -> Result<Vec<String>> {
    if tables.is_empty() {
        return Err(ReflectionError::NoTables);
    }

    Ok(tables
        .into_iter()
        .filter(|table| {
            let ignored = ignore.iter().any(|i| i == table);
            if ignored {
                tracing::info!(table = %table, "ignoring table");
            }
            !ignored
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_tables() {
        let tables = vec!["migrations".to_string(), "users".to_string()];
        let kept = filter_tables(tables, &["migrations".to_string()]).unwrap();
        assert_eq!(kept, vec!["users".to_string()]);
    }

    #[test]
    fn test_filter_tables_everything_ignored() {
        let tables = vec!["migrations".to_string()];
        let kept = filter_tables(tables, &["migrations".to_string()]).unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn test_filter_tables_empty_database() {
        let err = filter_tables(Vec::new(), &[]).unwrap_err();
        assert!(matches!(err, ReflectionError::NoTables));
    }

    #[test]
    fn test_connect_without_target() {
        let config = DatabaseConfig {
            env: Some("TABLECRAFT_TEST_UNSET_VAR".to_string()),
            ..Default::default()
        };
        let err = connect(&config).err().unwrap();
        assert!(matches!(err, ReflectionError::MissingDatabase { .. }));
    }
}
