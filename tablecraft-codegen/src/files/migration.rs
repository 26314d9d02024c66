use std::path::{Path, PathBuf};

use tablecraft_config::GlobalConfig;
use tablecraft_core::GeneratedFile;
use tablecraft_schema::{Column, ColumnType, Table};

use super::{has_suffix, migration_class};
use crate::{
    PlanItem, SharedFieldPlan,
    builder::{CodeBuilder, MethodCall, MethodChain, PhpValue, quote},
};

/// `{prefix}_create_{table}_table.php`
pub struct MigrationFile<'a> {
    directory: &'a str,
    prefix: String,
    table: &'a Table,
    plan: SharedFieldPlan<'a>,
}

impl<'a> MigrationFile<'a> {
    pub fn new(
        directory: &'a str,
        prefix: impl Into<String>,
        table: &'a Table,
        global: &GlobalConfig,
    ) -> Self {
        Self {
            directory,
            prefix: prefix.into(),
            table,
            plan: SharedFieldPlan::classify(&table.columns, global),
        }
    }

    fn suffix(&self) -> String {
        format!("_create_{}_table.php", self.table.name)
    }

    fn write_columns(&self, b: &mut CodeBuilder) {
        let primary = self.table.primary_key();
        let single_key = primary.len() == 1;

        for item in self.plan.items() {
            match item {
                PlanItem::Column(column) => b.push_line(&column_line(column, single_key)),
                PlanItem::Shared(group) => {
                    b.push_line(&MethodChain::new("$table").then(group.call()).render())
                }
            };
        }

        if primary.len() > 1 {
            let names = primary
                .iter()
                .map(|c| PhpValue::str(c.name.as_str()))
                .collect();
            let chain = MethodChain::new("$table")
                .call(MethodCall::new("primary").arg(PhpValue::List(names)));
            b.push_line(&chain.render());
        }
    }
}

/// One `$table->...` line; `single_key` is set when the table has exactly one
/// primary-key column.
fn column_line(column: &Column, single_key: bool) -> String {
    let ty = column.column_type;
    let identity = ty.is_identity();

    let mut call = MethodCall::new(blueprint_method(ty)).arg(PhpValue::str(column.name.as_str()));
    match ty {
        ColumnType::String => {
            if let Some(length) = column.length {
                call = call.arg(PhpValue::Int(length.into()));
            }
        }
        ColumnType::Decimal => {
            if let Some((precision, scale)) = column.precision {
                call = call
                    .arg(PhpValue::Int(precision.into()))
                    .arg(PhpValue::Int(scale.into()));
            }
        }
        _ => {}
    }

    let mut chain = MethodChain::new("$table")
        .call(call)
        .then_if(column.unsigned && !identity, "unsigned")
        .then_if(column.is_auto_increment && !identity, "autoIncrement")
        .then_if(column.is_primary_key && single_key && !identity, "primary")
        .then_if(column.nullable, "nullable");

    chain = match column.default.as_deref() {
        Some("CURRENT_TIMESTAMP") => chain.then("useCurrent"),
        Some(value) => chain.call(MethodCall::new("default").arg(PhpValue::str(value))),
        None => chain,
    };

    chain.render()
}

impl GeneratedFile for MigrationFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.directory)
            .join(format!("{}{}", self.prefix, self.suffix()))
    }

    fn render(&self) -> String {
        let table = quote(&self.table.name);
        migration_class(
            |b| {
                b.block_with_close(
                    &format!("Schema::create({}, function (Blueprint $table) {{", table),
                    "});",
                    |b| b.with(|b| self.write_columns(b)),
                )
            },
            |b| b.line(&format!("Schema::dropIfExists({});", table)),
        )
    }

    fn exists(&self, base: &Path) -> bool {
        has_suffix(&base.join(self.directory), &self.suffix())
    }
}

/// Schema builder method for a column type.
fn blueprint_method(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Increments => "increments",
        ColumnType::BigIncrements => "bigIncrements",
        ColumnType::Integer => "integer",
        ColumnType::BigInteger => "bigInteger",
        ColumnType::String => "string",
        ColumnType::Text => "text",
        ColumnType::DateTime => "dateTime",
        ColumnType::Timestamp => "timestamp",
        ColumnType::Date => "date",
        ColumnType::Float => "float",
        ColumnType::Decimal => "decimal",
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tablecraft_config::Config;
    use tablecraft_core::WriteResult;
    use tablecraft_schema::{RawColumn, normalize};
    use tempfile::TempDir;

    use super::*;

    fn column(name: &str, native: &str) -> RawColumn {
        RawColumn {
            name: name.to_string(),
            native_type: native.to_string(),
            nullable: Some(false),
            ..Default::default()
        }
    }

    fn table(name: &str, raw: Vec<RawColumn>) -> Table {
        Table {
            name: name.to_string(),
            columns: raw.iter().map(normalize).collect(),
            foreign_keys: Vec::new(),
        }
    }

    fn users() -> Table {
        table(
            "users",
            vec![
                RawColumn {
                    key: Some("PRI".to_string()),
                    extra: Some("auto_increment".to_string()),
                    ..column("id", "bigint(20) unsigned")
                },
                column("name", "varchar(100)"),
                RawColumn {
                    nullable: Some(true),
                    ..column("bio", "text")
                },
                RawColumn {
                    default: Some("'0.00'".to_string()),
                    ..column("balance", "decimal(10,2)")
                },
                RawColumn {
                    default: Some("CURRENT_TIMESTAMP".to_string()),
                    ..column("created_at", "timestamp")
                },
                RawColumn {
                    nullable: Some(true),
                    ..column("updated_at", "timestamp")
                },
            ],
        )
    }

    #[test]
    fn test_render_columns() {
        let users = users();
        let file = MigrationFile::new("database/migrations", "0001", &users, &GlobalConfig::default());

        insta::assert_snapshot!(file.render(), @r"
        <?php

        use Illuminate\Database\Migrations\Migration;
        use Illuminate\Database\Schema\Blueprint;
        use Illuminate\Support\Facades\Schema;

        return new class extends Migration
        {
            /**
             * Run the migrations.
             */
            public function up(): void
            {
                Schema::create('users', function (Blueprint $table) {
                    $table->bigIncrements('id');
                    $table->string('name', 100);
                    $table->text('bio')->nullable();
                    $table->decimal('balance', 10, 2)->default('0.00');
                    $table->timestamp('created_at')->useCurrent();
                    $table->timestamp('updated_at')->nullable();
                });
            }

            /**
             * Reverse the migrations.
             */
            public function down(): void
            {
                Schema::dropIfExists('users');
            }
        };
        ");
    }

    #[test]
    fn test_timestamps_replace_columns() {
        let users = users();
        let config: Config = "[global]\nuse_timestamps = true\n".parse().unwrap();
        let rendered = MigrationFile::new("m", "0001", &users, &config.global).render();

        assert_eq!(rendered.matches("$table->timestamps();").count(), 1);
        assert!(!rendered.contains("'created_at'"));
        assert!(!rendered.contains("'updated_at'"));
    }

    #[test]
    fn test_non_identity_keys() {
        let tokens = table(
            "tokens",
            vec![
                RawColumn {
                    key: Some("PRI".to_string()),
                    ..column("token", "varchar(64)")
                },
                RawColumn {
                    extra: Some("auto_increment".to_string()),
                    ..column("seq", "int unsigned")
                },
            ],
        );
        let rendered = MigrationFile::new("m", "0001", &tokens, &GlobalConfig::default()).render();

        assert!(rendered.contains("$table->string('token', 64)->primary();"));
        assert!(rendered.contains("$table->integer('seq')->unsigned()->autoIncrement();"));
    }

    #[test]
    fn test_composite_primary_key() {
        let pivot = table(
            "role_user",
            vec![
                RawColumn {
                    key: Some("PRI".to_string()),
                    ..column("role_id", "INTEGER")
                },
                RawColumn {
                    key: Some("PRI".to_string()),
                    ..column("user_id", "INTEGER")
                },
            ],
        );
        let rendered = MigrationFile::new("m", "0001", &pivot, &GlobalConfig::default()).render();

        assert!(rendered.contains("$table->integer('role_id');\n"));
        assert!(rendered.contains("$table->primary(['role_id', 'user_id']);"));
        assert!(!rendered.contains("->primary();"));
    }

    #[test]
    fn test_column_line_primary_only_for_single_key() {
        let token = normalize(&RawColumn {
            key: Some("PRI".to_string()),
            ..column("token", "varchar(64)")
        });
        let plain = normalize(&column("label", "varchar(64)"));

        assert_eq!(
            column_line(&token, true),
            "$table->string('token', 64)->primary();"
        );
        assert_eq!(column_line(&token, false), "$table->string('token', 64);");
        assert_eq!(column_line(&plain, true), "$table->string('label', 64);");
    }

    #[test]
    fn test_existing_migration_with_other_prefix_is_skipped() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("database/migrations");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("2024_01_01_000000_create_users_table.php"), "mine").unwrap();

        let users = users();
        let file = MigrationFile::new(
            "database/migrations",
            "2025_06_01_120000",
            &users,
            &GlobalConfig::default(),
        );

        assert!(file.exists(temp.path()));
        assert_eq!(file.write(temp.path()).unwrap(), WriteResult::Skipped);
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
    }

    #[test]
    fn test_path() {
        let users = users();
        let file = MigrationFile::new("database/migrations", "0003", &users, &GlobalConfig::default());

        assert_eq!(
            file.path(Path::new("/app")),
            PathBuf::from("/app/database/migrations/0003_create_users_table.php")
        );
    }
}
