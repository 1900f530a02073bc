//! # Repository Publisher CLI
//!
//! This is the binary entry point for the `repo-publisher` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Installing the logger and executing the selected command.
//! - Translating top-level errors into a non-zero exit status.
//!
//! The publishing logic lives in the library crate; the binary is a thin
//! wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
