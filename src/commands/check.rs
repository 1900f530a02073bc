//! # Check Command Implementation
//!
//! This module implements the `check` subcommand: it answers whether a
//! relative URL can be used next to the related repositories listed in a
//! manifest. The URL defaults to the manifest repository's own relative path.
//!
//! Exits with a non-zero status when the URL conflicts, or when the related
//! repositories overlap each other so no lookup can be built.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use repo_publisher::conflict::ConflictDetector;
use repo_publisher::output::{Marker, OutputConfig};

use super::load_manifest;

/// Check a relative URL for conflicts
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the publish manifest.
    #[arg(short, long, value_name = "FILE", env = "REPO_PUBLISHER_MANIFEST")]
    pub manifest: PathBuf,

    /// Relative URL to check instead of the manifest repository's own.
    #[arg(long, value_name = "URL")]
    pub relative_url: Option<String>,
}

/// Execute the `check` command.
pub fn execute(args: CheckArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let manifest = load_manifest(&args.manifest)?;

    let candidate = args
        .relative_url
        .as_deref()
        .unwrap_or_else(|| manifest.repository.relative_path(&manifest.config));

    let detector = ConflictDetector::from_related(&manifest.related_repos)
        .map_err(|e| anyhow::anyhow!("Related repositories overlap: {}", e))?;

    match detector.check(candidate) {
        None => {
            println!(
                "{} No conflict for {} among {} related repositories",
                out.marker(Marker::Ok),
                out.emphasize(candidate),
                manifest.related_repos.len()
            );
            Ok(())
        }
        Some(conflict) => {
            println!("{} {}", out.marker(Marker::Err), conflict);
            Err(anyhow::anyhow!(
                "Relative url {} is already in use",
                candidate
            ))
        }
    }
}
