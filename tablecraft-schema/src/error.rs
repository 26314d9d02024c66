use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReflectionError>;

/// Failure while reading schema metadata from the database.
#[derive(Debug, Error)]
pub enum ReflectionError {
    #[error("failed to connect to {driver} database '{target}': {message}")]
    Connect {
        driver: &'static str,
        target: String,
        message: String,
    },

    #[error("failed to {action}: {message}")]
    Query { action: String, message: String },

    #[error("no tables exist or could not fetch")]
    NoTables,

    #[error(
        "no database configured; set database.path or database.url, or the {env} environment variable"
    )]
    MissingDatabase { env: String },
}

impl ReflectionError {
    pub(crate) fn query(action: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ReflectionError::Query {
            action: action.into(),
            message: err.to_string(),
        }
    }
}
