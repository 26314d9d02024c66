// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod controllers;
mod database;
mod error;
mod file;
mod global;
mod migrations;
mod models;
mod parse;
mod scoped;
mod template;

pub use controllers::ControllersConfig;
pub use database::{DatabaseConfig, Driver};
pub use error::{ConfigurationError, Error, Result, SourceContext};
pub use file::ConfigFile;
pub use global::{
    GlobalConfig, SOFT_DELETE_COLUMNS, SharedField, SharedFieldKind, SharedFieldSpec, SharedFields,
    TIMESTAMP_COLUMNS,
};
pub use migrations::{FilePrefix, MigrationsConfig};
pub use models::{ModelsConfig, RelationKind, Relationship};
pub use parse::parse_config;
pub use scoped::{Scoped, WILDCARD};
use serde::Deserialize;
pub use template::template;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "tablecraft.toml";

/// Root configuration for tablecraft.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Database connection used for reflection
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Settings shared by every generator
    #[serde(default)]
    pub global: GlobalConfig,

    /// Migration generator settings
    #[serde(default)]
    pub migrations: MigrationsConfig,

    /// Model generator settings
    #[serde(default)]
    pub models: ModelsConfig,

    /// Controller generator settings
    #[serde(default)]
    pub controllers: ControllersConfig,
}

impl Config {
    /// Check whether a table is in the ignore list.
    pub fn is_ignored(&self, table: &str) -> bool {
        self.global.ignore_tables.iter().any(|t| t == table)
    }
}
