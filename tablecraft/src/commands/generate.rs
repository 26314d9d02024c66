use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use tablecraft_codegen::Target;
use tablecraft_config::{CONFIG_FILE, ConfigFile};

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to tablecraft.toml (defaults to ./tablecraft.toml)
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Base directory of the Laravel application (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Database path or URL (overrides the [database] section)
    #[arg(short, long)]
    pub database: Option<String>,
}

impl GenerateCommand {
    pub fn run(&self, targets: &[Target], message: &'static str) -> Result<()> {
        let mut config = ConfigFile::open(&self.config)
            .unwrap_or_exit()
            .into_config();
        if let Some(database) = &self.database {
            config.database.set_target(database);
        }

        println!(
            "Generating {} from {} database...",
            ops::describe(targets),
            config.database.driver
        );

        let opts = GenerateOptions {
            output_dir: &self.output,
            dry_run: self.dry_run,
            message,
        };
        let report = ops::generate(&config, targets, opts).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
