use rusqlite::Connection;
use tablecraft_config::{DatabaseConfig, Driver};
use tablecraft_schema::{
    ColumnType, Dialect, ReferentialAction, ReflectionError, SchemaReflector, SqliteReflector,
    connect,
};
use tempfile::TempDir;

const SCHEMA: &str = r#"
CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(255) NOT NULL DEFAULT 'unknown@example.com',
    balance DECIMAL(10, 2) NOT NULL DEFAULT 0,
    bio TEXT DEFAULT NULL,
    created_at DATETIME,
    updated_at DATETIME
);

CREATE TABLE posts (
    id INTEGER PRIMARY KEY,
    user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    published_on DATE,
    deleted_at TIMESTAMP
);

CREATE TABLE migrations (
    id INTEGER PRIMARY KEY,
    migration VARCHAR(255) NOT NULL
);
"#;

fn database(temp: &TempDir, sql: &str) -> String {
    let path = temp.path().join("database.sqlite");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(sql).unwrap();
    path.display().to_string()
}

#[test]
fn test_list_tables_skips_ignored_and_internal() {
    let temp = TempDir::new().unwrap();
    let reflector = SqliteReflector::open(&database(&temp, SCHEMA)).unwrap();

    let tables = reflector.list_tables(&["migrations".to_string()]).unwrap();

    assert_eq!(tables, vec!["posts".to_string(), "users".to_string()]);
    assert_eq!(reflector.dialect(), Dialect::Sqlite);
}

#[test]
fn test_reflect_table_normalizes_columns() {
    let temp = TempDir::new().unwrap();
    let reflector = SqliteReflector::open(&database(&temp, SCHEMA)).unwrap();

    let users = reflector.reflect_table("users").unwrap();
    let names = users.column_names();
    assert_eq!(
        names,
        vec!["id", "name", "email", "balance", "bio", "created_at", "updated_at"]
    );

    let id = users.column("id").unwrap();
    assert_eq!(id.column_type, ColumnType::Increments);
    assert!(id.is_primary_key);

    let name = users.column("name").unwrap();
    assert_eq!(name.column_type, ColumnType::String);
    assert_eq!(name.length, Some(100));
    assert!(!name.nullable);

    let email = users.column("email").unwrap();
    assert_eq!(email.default.as_deref(), Some("unknown@example.com"));

    let balance = users.column("balance").unwrap();
    assert_eq!(balance.column_type, ColumnType::Decimal);
    assert_eq!(balance.precision, Some((10, 2)));
    assert_eq!(balance.default.as_deref(), Some("0"));

    let bio = users.column("bio").unwrap();
    assert_eq!(bio.column_type, ColumnType::Text);
    assert!(bio.nullable);
    assert_eq!(bio.default, None);

    assert_eq!(
        users.column("created_at").unwrap().column_type,
        ColumnType::DateTime
    );
    assert!(users.foreign_keys.is_empty());
}

#[test]
fn test_reflect_table_foreign_keys() {
    let temp = TempDir::new().unwrap();
    let reflector = SqliteReflector::open(&database(&temp, SCHEMA)).unwrap();

    let posts = reflector.reflect_table("posts").unwrap();

    assert_eq!(
        posts.column("user_id").unwrap().column_type,
        ColumnType::BigInteger
    );
    assert_eq!(posts.column("deleted_at").unwrap().column_type, ColumnType::Timestamp);
    assert_eq!(posts.column("published_on").unwrap().column_type, ColumnType::Date);

    assert_eq!(posts.foreign_keys.len(), 1);
    let fk = &posts.foreign_keys[0];
    assert_eq!(fk.owning_table, "posts");
    assert_eq!(fk.column, "user_id");
    assert_eq!(fk.referenced_table, "users");
    assert_eq!(fk.referenced_column, "id");
    assert_eq!(fk.constraint_name, "posts_user_id_foreign");
    assert_eq!(fk.on_delete, Some(ReferentialAction::Cascade));
}

#[test]
fn test_empty_database_has_no_tables() {
    let temp = TempDir::new().unwrap();
    let reflector = SqliteReflector::open(&database(&temp, "CREATE TABLE t (x); DROP TABLE t;")).unwrap();

    let err = reflector.list_tables(&[]).unwrap_err();
    assert!(matches!(err, ReflectionError::NoTables));
}

#[test]
fn test_missing_file_is_a_connect_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.sqlite").display().to_string();

    let err = SqliteReflector::open(&path).err().unwrap();
    assert!(matches!(err, ReflectionError::Connect { driver: "sqlite", .. }));
    assert!(!temp.path().join("missing.sqlite").exists());
}

#[test]
fn test_connect_selects_sqlite_backend() {
    let temp = TempDir::new().unwrap();
    let config = DatabaseConfig {
        driver: Driver::Sqlite,
        path: Some(database(&temp, SCHEMA)),
        url: None,
        env: None,
    };

    let reflector = connect(&config).unwrap_or_else(|e| panic!("{}", e));
    assert_eq!(reflector.dialect(), Dialect::Sqlite);
    assert_eq!(reflector.list_tables(&[]).unwrap().len(), 3);
}

#[test]
fn test_table_serializes_for_inspection() {
    let temp = TempDir::new().unwrap();
    let reflector = SqliteReflector::open(&database(&temp, SCHEMA)).unwrap();

    let posts = reflector.reflect_table("posts").unwrap();
    let json = serde_json::to_value(&posts).unwrap();

    assert_eq!(json["name"], "posts");
    assert_eq!(json["columns"][0]["column_type"], "increments");
    assert_eq!(json["foreign_keys"][0]["on_delete"], "cascade");
}
