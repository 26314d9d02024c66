use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use super::{Dialect, SchemaReflector, filter_tables};
use crate::{ForeignKey, RawColumn, ReferentialAction, ReflectionError, Result};

/// Reflects a SQLite database file through `sqlite_master` and pragmas.
pub struct SqliteReflector {
    conn: Connection,
}

/// One row of `PRAGMA table_info`.
struct TableInfoRow {
    name: String,
    native_type: String,
    notnull: bool,
    default: Option<String>,
    pk: i64,
}

impl SqliteReflector {
    /// Open an existing database file read-only.
    pub fn open(path: &str) -> Result<Self> {
        let connect_error = |message: String| ReflectionError::Connect {
            driver: "sqlite",
            target: path.to_string(),
            message,
        };

        let is_file = path != ":memory:" && !path.starts_with("file:");
        if is_file && !Path::new(path).exists() {
            return Err(connect_error("database file does not exist".to_string()));
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn =
            Connection::open_with_flags(path, flags).map_err(|e| connect_error(e.to_string()))?;

        tracing::debug!(path, "opened SQLite database");
        Ok(Self { conn })
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    fn table_info(&self, table: &str) -> Result<Vec<TableInfoRow>> {
        let sql = format!("PRAGMA table_info({})", quote_literal(table));
        let action = || format!("read columns of '{}'", table);

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| ReflectionError::query(action(), e))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(TableInfoRow {
                    name: row.get(1)?,
                    native_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    notnull: row.get::<_, i64>(3)? != 0,
                    default: row.get(4)?,
                    pk: row.get(5)?,
                })
            })
            .map_err(|e| ReflectionError::query(action(), e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| ReflectionError::query(action(), e))
    }
}

impl SchemaReflector for SqliteReflector {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn list_tables(&self, ignore: &[String]) -> Result<Vec<String>> {
        let action = "list tables";
        let mut stmt = self
            .conn
            .prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
                 ORDER BY name",
            )
            .map_err(|e| ReflectionError::query(action, e))?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| ReflectionError::query(action, e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| ReflectionError::query(action, e))?;

        filter_tables(tables, ignore)
    }

    fn columns(&self, table: &str) -> Result<Vec<RawColumn>> {
        let rows = self.table_info(table)?;
        let pk_count = rows.iter().filter(|r| r.pk > 0).count();

        Ok(rows
            .into_iter()
            .map(|row| {
                // A lone INTEGER primary key aliases the rowid and auto-increments.
                let rowid_alias = row.pk > 0
                    && pk_count == 1
                    && row.native_type.trim().eq_ignore_ascii_case("integer");

                RawColumn {
                    name: row.name,
                    native_type: row.native_type,
                    nullable: Some(!row.notnull && row.pk == 0),
                    key: (row.pk > 0).then(|| "PRI".to_string()),
                    extra: rowid_alias.then(|| "auto_increment".to_string()),
                    default: row.default,
                }
            })
            .collect())
    }

    fn foreign_keys(&self, table: &str) -> Result<Vec<ForeignKey>> {
        let sql = format!("PRAGMA foreign_key_list({})", quote_literal(table));
        let action = || format!("read foreign keys of '{}'", table);

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| ReflectionError::query(action(), e))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, Option<String>>(6)?,
                ))
            })
            .map_err(|e| ReflectionError::query(action(), e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| ReflectionError::query(action(), e))?;

        rows.into_iter()
            .map(|(referenced_table, column, to, on_delete)| {
                // A missing target column means the parent's primary key.
                let referenced_column = match to {
                    Some(to) => to,
                    None => self.primary_key_column(&referenced_table)?,
                };

                Ok(ForeignKey {
                    owning_table: table.to_string(),
                    constraint_name: ForeignKey::conventional_name(table, &column),
                    column,
                    referenced_table,
                    referenced_column,
                    on_delete: on_delete.as_deref().and_then(ReferentialAction::parse),
                })
            })
            .collect()
    }
}

impl SqliteReflector {
    fn primary_key_column(&self, table: &str) -> Result<String> {
        Ok(self
            .table_info(table)?
            .into_iter()
            .find(|r| r.pk == 1)
            .map(|r| r.name)
            .unwrap_or_else(|| "id".to_string()))
    }
}

/// Quote a value as a SQL string literal.
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
