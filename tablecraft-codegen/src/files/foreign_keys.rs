use std::path::{Path, PathBuf};

use tablecraft_core::GeneratedFile;
use tablecraft_schema::ForeignKey;

use super::{has_suffix, migration_class};
use crate::builder::{CodeBuilder, MethodCall, MethodChain, PhpValue, quote};

const SUFFIX: &str = "_add_foreign_keys.php";

/// `{prefix}_add_foreign_keys.php`, written after every per-table migration
/// so the referenced tables already exist.
pub struct ForeignKeysMigrationFile<'a> {
    directory: &'a str,
    prefix: String,
    foreign_keys: Vec<&'a ForeignKey>,
}

impl<'a> ForeignKeysMigrationFile<'a> {
    pub fn new(
        directory: &'a str,
        prefix: impl Into<String>,
        foreign_keys: Vec<&'a ForeignKey>,
    ) -> Self {
        Self {
            directory,
            prefix: prefix.into(),
            foreign_keys,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.foreign_keys.is_empty()
    }

    fn each_table<F>(&self, b: CodeBuilder, statement: F) -> CodeBuilder
    where
        F: Fn(&ForeignKey) -> String,
    {
        let mut first = true;
        self.foreign_keys.iter().fold(b, |b, fk| {
            let b = if first { b } else { b.blank() };
            first = false;
            b.block_with_close(
                &format!(
                    "Schema::table({}, function (Blueprint $table) {{",
                    quote(&fk.owning_table)
                ),
                "});",
                |b| b.line(&statement(fk)),
            )
        })
    }
}

fn add_constraint(fk: &ForeignKey) -> String {
    let chain = MethodChain::new("$table")
        .call(
            MethodCall::new("foreign")
                .arg(PhpValue::str(fk.column.as_str()))
                .arg(PhpValue::str(fk.constraint_name.as_str())),
        )
        .call(MethodCall::new("references").arg(PhpValue::str(fk.referenced_column.as_str())))
        .call(MethodCall::new("on").arg(PhpValue::str(fk.referenced_table.as_str())));

    match fk.on_delete.filter(|action| action.is_action()) {
        Some(action) => chain
            .call(MethodCall::new("onDelete").arg(PhpValue::str(action.as_str())))
            .render(),
        None => chain.render(),
    }
}

fn drop_constraint(fk: &ForeignKey) -> String {
    MethodChain::new("$table")
        .call(MethodCall::new("dropForeign").arg(PhpValue::str(fk.constraint_name.as_str())))
        .render()
}

impl GeneratedFile for ForeignKeysMigrationFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.directory)
            .join(format!("{}{}", self.prefix, SUFFIX))
    }

    fn render(&self) -> String {
        migration_class(
            |b| self.each_table(b, add_constraint),
            |b| self.each_table(b, drop_constraint),
        )
    }

    fn exists(&self, base: &Path) -> bool {
        has_suffix(&base.join(self.directory), SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use tablecraft_schema::ReferentialAction;

    use super::*;

    fn fk(table: &str, column: &str, on: &str, on_delete: Option<ReferentialAction>) -> ForeignKey {
        ForeignKey {
            owning_table: table.to_string(),
            column: column.to_string(),
            referenced_table: on.to_string(),
            referenced_column: "id".to_string(),
            constraint_name: ForeignKey::conventional_name(table, column),
            on_delete,
        }
    }

    #[test]
    fn test_render() {
        let keys = [
            fk("posts", "user_id", "users", Some(ReferentialAction::Cascade)),
            fk("comments", "post_id", "posts", Some(ReferentialAction::NoAction)),
        ];
        let file = ForeignKeysMigrationFile::new("database/migrations", "0004", keys.iter().collect());

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
                Schema::table('posts', function (Blueprint $table) {
                    $table->foreign('user_id', 'posts_user_id_foreign')->references('id')->on('users')->onDelete('cascade');
                });

                Schema::table('comments', function (Blueprint $table) {
                    $table->foreign('post_id', 'comments_post_id_foreign')->references('id')->on('posts');
                });
            }

            /**
             * Reverse the migrations.
             */
            public function down(): void
            {
                Schema::table('posts', function (Blueprint $table) {
                    $table->dropForeign('posts_user_id_foreign');
                });

                Schema::table('comments', function (Blueprint $table) {
                    $table->dropForeign('comments_post_id_foreign');
                });
            }
        };
        ");
    }

    #[test]
    fn test_set_null_action() {
        let keys = [fk("posts", "editor_id", "users", Some(ReferentialAction::SetNull))];
        let file = ForeignKeysMigrationFile::new("m", "0002", keys.iter().collect());

        assert!(file.render().contains("->onDelete('set null');"));
        assert_eq!(
            file.path(Path::new(".")),
            PathBuf::from("./m/0002_add_foreign_keys.php")
        );
    }
}
