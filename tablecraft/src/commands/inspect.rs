use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use tablecraft_config::{CONFIG_FILE, ConfigFile};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{InspectFormat, Report, TerminalOutput},
};

#[derive(Args)]
pub struct InspectCommand {
    /// Path to tablecraft.toml (defaults to ./tablecraft.toml)
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Database path or URL (overrides the [database] section)
    #[arg(short, long)]
    pub database: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: InspectFormat,

    /// Also reflect tables in global.ignore_tables
    #[arg(long)]
    pub all: bool,
}

impl InspectCommand {
    pub fn run(&self) -> Result<()> {
        let mut config = ConfigFile::open(&self.config)
            .unwrap_or_exit()
            .into_config();
        if let Some(database) = &self.database {
            config.database.set_target(database);
        }

        let report = ops::inspect(&config, self.all).unwrap_or_exit();
        match self.format {
            InspectFormat::Text => report.render(&mut TerminalOutput::new()),
            InspectFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&report.to_json())?)
            }
        }

        Ok(())
    }
}
