use std::fmt;

use serde::Deserialize;

/// Supported database backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    #[default]
    Sqlite,
    #[serde(alias = "mariadb")]
    Mysql,
}

impl Driver {
    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::Sqlite => "sqlite",
            Driver::Mysql => "mysql",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the database that gets reflected
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    /// Backend driver
    #[serde(default)]
    pub driver: Driver,

    /// Direct file path to the SQLite database (e.g., "database/database.sqlite")
    pub path: Option<String>,

    /// Connection URL for client/server backends (e.g., "mysql://root@localhost/app")
    pub url: Option<String>,

    /// Environment variable holding the path or URL (ignored if `path`/`url` is set)
    pub env: Option<String>,
}

impl DatabaseConfig {
    /// Get the default environment variable name.
    pub fn default_env(&self) -> &'static str {
        "DATABASE_URL"
    }

    /// Name of the environment variable consulted when no path/url is set.
    pub fn env_var(&self) -> &str {
        self.env.as_deref().unwrap_or(self.default_env())
    }

    /// Resolve the connection target for the configured driver.
    ///
    /// SQLite prefers `path`, MySQL prefers `url`; either falls back to the
    /// environment variable.
    pub fn connection_string(&self) -> Option<String> {
        let direct = match self.driver {
            Driver::Sqlite => self.path.as_ref().or(self.url.as_ref()),
            Driver::Mysql => self.url.as_ref(),
        };

        direct
            .cloned()
            .or_else(|| std::env::var(self.env_var()).ok())
            .filter(|s| !s.trim().is_empty())
    }

    /// Point the configured driver at `target`, as `--database` does.
    pub fn set_target(&mut self, target: impl Into<String>) {
        match self.driver {
            Driver::Sqlite => self.path = Some(target.into()),
            Driver::Mysql => self.url = Some(target.into()),
        }
    }
}
