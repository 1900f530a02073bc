//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks a
//! manifest's distributor configuration without publishing anything:
//! required and supported keys, value types, the publish root override, and
//! relative URL conflicts with the related repositories.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use repo_publisher::output::{Marker, OutputConfig};
use repo_publisher::validation;

use super::load_manifest;

/// Validate the distributor configuration of a manifest
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the publish manifest.
    #[arg(short, long, value_name = "FILE", env = "REPO_PUBLISHER_MANIFEST")]
    pub manifest: PathBuf,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    println!(
        "{} Validating manifest: {}",
        out.marker(Marker::Scan),
        args.manifest.display()
    );

    let manifest = match load_manifest(&args.manifest) {
        Ok(manifest) => manifest,
        Err(e) => {
            println!("{} {}", out.marker(Marker::Err), e);
            return Err(e);
        }
    };

    println!("\n{} Manifest Summary:", out.marker(Marker::Info));
    println!("   Repository: {}", manifest.repository.id);
    println!(
        "   Relative path: {}",
        manifest.repository.relative_path(&manifest.config)
    );
    println!("   Units: {}", manifest.units.len());
    println!("   Related repositories: {}", manifest.related_repos.len());

    match validation::validate_config(&manifest.config, &manifest.related_repos) {
        Ok(()) => {
            println!("\n{} Configuration is valid", out.marker(Marker::Ok));
            Ok(())
        }
        Err(e) => {
            println!("\n{} {}", out.marker(Marker::Err), e);
            Err(anyhow::anyhow!("Configuration validation failed"))
        }
    }
}
