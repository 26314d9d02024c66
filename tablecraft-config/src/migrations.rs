use serde::Deserialize;

/// How migration file names are prefixed so they sort in creation order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilePrefix {
    /// `YYYY_MM_DD_HHMMSS`, captured once per run
    #[default]
    #[serde(alias = "timestamps")]
    Timestamp,
    /// Zero-padded four-digit counter (`0001`, `0002`, ...)
    Index,
}

/// Migration generator settings
#[derive(Debug, Clone, Deserialize)]
pub struct MigrationsConfig {
    /// Directory migrations are written to, relative to the output base
    #[serde(default = "default_output_directory")]
    pub output_directory: String,

    #[serde(default)]
    pub file_prefix: FilePrefix,

    /// Directory the Blueprint macro service provider is written to
    #[serde(default = "default_providers_directory")]
    pub providers_directory: String,
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
            file_prefix: FilePrefix::default(),
            providers_directory: default_providers_directory(),
        }
    }
}

fn default_output_directory() -> String {
    "database/migrations".to_string()
}

fn default_providers_directory() -> String {
    "app/Providers".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: MigrationsConfig = toml::from_str("").unwrap();
        assert_eq!(config.output_directory, "database/migrations");
        assert_eq!(config.file_prefix, FilePrefix::Timestamp);
        assert_eq!(config.providers_directory, "app/Providers");
    }

    #[test]
    fn test_file_prefix_values() {
        let config: MigrationsConfig = toml::from_str(r#"file_prefix = "index""#).unwrap();
        assert_eq!(config.file_prefix, FilePrefix::Index);

        let config: MigrationsConfig = toml::from_str(r#"file_prefix = "timestamps""#).unwrap();
        assert_eq!(config.file_prefix, FilePrefix::Timestamp);

        assert!(toml::from_str::<MigrationsConfig>(r#"file_prefix = "uuid""#).is_err());
    }
}
