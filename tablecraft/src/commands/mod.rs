mod completions;
mod generate;
mod init;
mod inspect;

use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use init::InitCommand;
use inspect::InspectCommand;
use tablecraft_codegen::Target;

/// Extension trait for exiting on errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for tablecraft_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for eyre::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "tablecraft")]
#[command(version)]
#[command(about = "Generate Laravel migrations, models and controllers from an existing database")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::GenerateAll(cmd) => cmd.run(
                &Target::ALL,
                "Migrations, Models, and Controllers generated successfully.",
            ),
            Commands::GenerateMigrations(cmd) => {
                cmd.run(&[Target::Migrations], "Migrations generated successfully.")
            }
            Commands::GenerateModels(cmd) => {
                cmd.run(&[Target::Models], "Models generated successfully.")
            }
            Commands::GenerateControllers(cmd) => {
                cmd.run(&[Target::Controllers], "Controllers generated successfully.")
            }
            Commands::Init(cmd) => cmd.run(),
            Commands::Inspect(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate controllers, models and migrations
    GenerateAll(GenerateCommand),

    /// Generate one migration per table, plus foreign keys
    GenerateMigrations(GenerateCommand),

    /// Generate one Eloquent model per table
    GenerateModels(GenerateCommand),

    /// Generate one resource controller per table
    GenerateControllers(GenerateCommand),

    /// Write a starter tablecraft.toml
    Init(InitCommand),

    /// Print the reflected database schema
    Inspect(InspectCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
