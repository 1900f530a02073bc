//! # Publish Command Implementation
//!
//! This module implements the `publish` subcommand: it loads a manifest,
//! validates the distributor configuration against the related repositories,
//! runs the publish pipeline and prints the resulting report.
//!
//! ## Output
//!
//! - `--format text` (default): a short human-readable summary followed by
//!   one line per failed item.
//! - `--format json`: the publish report as pretty-printed JSON.
//! - `--progress`: every progress snapshot is printed as one JSON line while
//!   the publish runs.
//!
//! The command exits with a non-zero status when the report is a failure,
//! after printing it.

use anyhow::Result;
use clap::{Args, ValueEnum};
use log::{debug, warn};
use std::path::PathBuf;

use repo_publisher::output::{Marker, OutputConfig};
use repo_publisher::phases::orchestrator::Publisher;
use repo_publisher::progress::ProgressMap;
use repo_publisher::report::PublishReport;
use repo_publisher::validation;

use super::load_manifest;

/// Report rendering formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Publish a repository described by a manifest
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Path to the publish manifest.
    #[arg(short, long, value_name = "FILE", env = "REPO_PUBLISHER_MANIFEST")]
    pub manifest: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Only print failures.
    #[arg(short, long)]
    pub quiet: bool,

    /// Print progress snapshots as JSON lines.
    #[arg(long)]
    pub progress: bool,
}

/// Execute the `publish` command.
pub fn execute(args: PublishArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let manifest = load_manifest(&args.manifest)?;
    let repo_id = manifest.repository.id.clone();

    if let Err(e) = validation::validate_config(&manifest.config, &manifest.related_repos) {
        println!("{} Configuration rejected: {}", out.marker(Marker::Err), e);
        return Err(anyhow::anyhow!(
            "Configuration for repository {} is invalid: {}",
            repo_id,
            e
        ));
    }

    if !args.quiet && args.format == ReportFormat::Text {
        println!(
            "{} Publishing repository {} ({} units)",
            out.marker(Marker::Link),
            out.emphasize(&repo_id),
            manifest.units.len()
        );
    }

    let print_progress = args.progress;
    let mut sink = |map: &ProgressMap| {
        debug!("Progress: {:?}", map);
        if print_progress {
            match serde_json::to_string(map) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!("Unable to serialize progress: {}", e),
            }
        }
    };

    let report = Publisher::default()
        .publish(
            &manifest.repository,
            &manifest.units,
            &manifest.config,
            &mut sink,
        )
        .map_err(|e| anyhow::anyhow!("Publish of repository {} failed: {}", repo_id, e))?;

    match args.format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => {
            for line in render_text(&report, &out, args.quiet) {
                println!("{}", line);
            }
        }
    }

    if !report.success {
        return Err(anyhow::anyhow!(
            "Publish of repository {} finished with {} errors",
            repo_id,
            report.summary.num_units_errors
        ));
    }
    Ok(())
}

/// Human-readable report lines
fn render_text(report: &PublishReport, out: &OutputConfig, quiet: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let summary = &report.summary;

    if !quiet {
        let marker = if report.success {
            Marker::Ok
        } else {
            Marker::Err
        };
        lines.push(format!(
            "{} Published {} of {} units to {}",
            out.marker(marker),
            summary.num_units_published,
            summary.num_units_attempted,
            summary.repo_publish_dir.display()
        ));
    }

    for detail in &report.details.errors {
        lines.push(format!(
            "{} {} -> {}: {}",
            out.marker(Marker::Err),
            detail.source.display(),
            detail.target.display(),
            detail.message
        ));
    }
    lines
}
