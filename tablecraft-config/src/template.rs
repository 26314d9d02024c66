use crate::Driver;

const HEADER: &str = r#"# tablecraft configuration
#
# Every section is optional; the values below are the defaults unless noted.
"#;

const SQLITE_DATABASE: &str = r#"[database]
driver = "sqlite"
path = "database/database.sqlite"
# env = "DATABASE_URL"
"#;

const MYSQL_DATABASE: &str = r#"[database]
driver = "mysql"
url = "mysql://root@localhost:3306/app"
# env = "DATABASE_URL"
"#;

const BODY: &str = r#"
[global]
ignore_tables = ["migrations", "failed_jobs", "password_resets", "password_reset_tokens", "cache", "cache_locks", "jobs", "job_batches", "sessions"]
use_common_fields = false
use_timestamps = true
use_soft_deletes = true
force_shared_fields = false
table_prefix = ""

# Columns folded into a single `$table->commonFields()` call.
# [[global.common_fields]]
# name = "created_by"
# type = "bigInteger"
# unsigned = true
# nullable = true

[migrations]
output_directory = "database/migrations"
file_prefix = "timestamp"    # or "index"
providers_directory = "app/Providers"

[models]
output_directory = "app/Models"
namespace = "App\\Models"
base_model = "Illuminate\\Database\\Eloquent\\Model"
pluralize = true
per_page = 25
columns = false
# date_format = "Y-m-d H:i:s"
traits = ["Illuminate\\Database\\Eloquent\\Factories\\HasFactory"]
guarded = ["id"]
hidden = ["*password", "*token", "*secret"]
casts = { created_at = "datetime", updated_at = "datetime" }

# Per-table settings use the table name as key, "*" as fallback:
# [models.fillable]
# "*" = []
# users = ["name", "email"]
#
# [[models.relationships.posts]]
# kind = "belongsTo"
# model = "App\\Models\\User"
# foreign_key = "user_id"
# owner_key = "id"
#
# [models.lifecycle_hooks.posts]
# creating = "function ($model) { $model->uuid = (string) Str::uuid(); }"
#
# [models.custom_mapping]
# user_has_models = "UserModel"

[controllers]
output_directory = "app/Http/Controllers"
namespace = "App\\Http\\Controllers"
"#;

/// Starter configuration written by `tablecraft init`.
pub fn template(driver: Driver) -> String {
    let database = match driver {
        Driver::Sqlite => SQLITE_DATABASE,
        Driver::Mysql => MYSQL_DATABASE,
    };
    format!("{}\n{}{}", HEADER, database, BODY)
}
