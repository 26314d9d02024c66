use std::path::PathBuf;

use clap::{Args, ValueEnum};
use dialoguer::{Select, theme::ColorfulTheme};
use eyre::{Context, Result};
use tablecraft_config::{CONFIG_FILE, Driver, template};
use tablecraft_core::{File, WriteResult};

/// Database backends offered by `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DriverArg {
    Sqlite,
    Mysql,
}

impl From<DriverArg> for Driver {
    fn from(arg: DriverArg) -> Self {
        match arg {
            DriverArg::Sqlite => Driver::Sqlite,
            DriverArg::Mysql => Driver::Mysql,
        }
    }
}

#[derive(Args)]
pub struct InitCommand {
    /// Where to write the configuration (defaults to ./tablecraft.toml)
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Database backend to configure
    #[arg(short, long, value_enum)]
    pub driver: Option<DriverArg>,

    /// Replace an existing configuration file
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let driver = match self.driver {
            Some(driver) => driver.into(),
            None => Self::prompt_driver()?,
        };
        let content = template(driver);

        if self.force {
            std::fs::write(&self.config, &content)
                .wrap_err_with(|| format!("Failed to write {}", self.config.display()))?;
        } else if let WriteResult::Skipped = File::new(&self.config, content).write()? {
            println!(
                "{} already exists; use --force to replace it",
                self.config.display()
            );
            return Ok(());
        }

        println!("Created {} for {}", self.config.display(), driver);
        println!();
        println!("Next steps:");
        println!("  edit the [database] section of {}", self.config.display());
        println!("  tablecraft inspect");
        println!("  tablecraft generate-all --dry-run");

        Ok(())
    }

    fn prompt_driver() -> Result<Driver> {
        let drivers = ["SQLite", "MySQL"];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select a database driver")
            .items(&drivers)
            .default(0)
            .interact()
            .wrap_err("Failed to get driver selection")?;

        Ok(match selection {
            0 => Driver::Sqlite,
            _ => Driver::Mysql,
        })
    }
}
