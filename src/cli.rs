//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Repository Publisher - Publish package repositories as symlink trees
#[derive(Parser, Debug)]
#[command(name = "repo-publisher")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    ///
    /// `RUST_LOG`, when set, takes precedence.
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the configuration, then publish the repository
    Publish(commands::publish::PublishArgs),

    /// Validate a manifest's distributor configuration
    Validate(commands::validate::ValidateArgs),

    /// Check a relative URL for conflicts with related repositories
    Check(commands::check::CheckArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Publish(args) => commands::publish::execute(args, &self.color),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
            Commands::Check(args) => commands::check::execute(args, &self.color),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // Only fails when a logger is already installed
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_secs()
        .try_init();
}
