//! Configuration parsing from files and strings.

use std::{path::Path, str::FromStr};

use crate::{CONFIG_FILE, Config, Error, Result, SourceContext};

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, CONFIG_FILE)
    }
}

impl Config {
    /// Parse a configuration file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_config(&content, &path.display().to_string())
    }
}

/// Parse a configuration from content with the given filename for error reporting.
pub fn parse_config(content: &str, filename: &str) -> Result<Config> {
    let source_ctx = SourceContext::new(content, filename);
    let config: Config = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_config(&config, &source_ctx)?;
    Ok(config)
}

/// Validate the configuration after parsing.
fn validate_config(config: &Config, ctx: &SourceContext) -> Result<()> {
    if config.models.per_page == Some(0) {
        return Err(ctx.validation_error_at_key("per_page must be greater than zero", "per_page"));
    }

    let directories = [
        ("output_directory", config.migrations.output_directory.as_str()),
        ("providers_directory", config.migrations.providers_directory.as_str()),
        ("output_directory", config.models.output_directory.as_str()),
        ("output_directory", config.controllers.output_directory.as_str()),
    ];
    for (key, value) in directories {
        if value.trim().is_empty() {
            return Err(ctx.validation_error_at_key(format!("{} must not be empty", key), key));
        }
    }

    for (table, class) in &config.models.custom_mapping {
        if class.trim().is_empty() {
            return Err(ctx.validation_error_at_key(
                format!("custom_mapping for '{}' must name a class", table),
                table,
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Driver, FilePrefix};

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config.database.driver, Driver::Sqlite);
        assert_eq!(config.migrations.file_prefix, FilePrefix::Timestamp);
        assert_eq!(config.models.output_directory, "app/Models");
        assert_eq!(config.controllers.namespace, "App\\Http\\Controllers");
        assert!(config.global.ignore_tables.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config: Config = r#"
[database]
driver = "mysql"
url = "mysql://root@localhost/app"

[global]
ignore_tables = ["migrations", "sessions"]
use_timestamps = true
table_prefix = "app_"

[migrations]
file_prefix = "index"

[models]
per_page = 50
traits = ["Illuminate\\Database\\Eloquent\\Factories\\HasFactory"]

[models.custom_mapping]
user_has_models = "UserModel"
"#
        .parse()
        .unwrap();

        assert_eq!(config.database.driver, Driver::Mysql);
        assert!(config.is_ignored("sessions"));
        assert!(!config.is_ignored("users"));
        assert_eq!(config.global.table_prefix, "app_");
        assert_eq!(config.migrations.file_prefix, FilePrefix::Index);
        assert_eq!(config.models.per_page, Some(50));
        assert_eq!(
            config.models.custom_mapping.get("user_has_models").map(String::as_str),
            Some("UserModel")
        );
    }

    #[test]
    fn test_zero_per_page_is_rejected() {
        let err = parse_config("[models]\nper_page = 0\n", "tablecraft.toml").unwrap_err();
        match *err {
            Error::Validation { span, message, .. } => {
                assert_eq!(message, "per_page must be greater than zero");
                assert_eq!(span.map(|s| s.offset()), Some(9));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_driver_is_a_parse_error() {
        let err = parse_config("[database]\ndriver = \"oracle\"\n", "tablecraft.toml").unwrap_err();
        assert!(matches!(*err, Error::Parse { span: Some(_), .. }));
    }

    #[test]
    fn test_unknown_file_prefix_is_a_parse_error() {
        let err = parse_config("[migrations]\nfile_prefix = \"uuid\"\n", "tablecraft.toml")
            .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file("/nonexistent/tablecraft.toml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
