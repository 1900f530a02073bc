//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `repo-publisher` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the global color
//!   flag and performs the command's logic by calling into the
//!   `repo_publisher` library.
//!
//! All commands read a publish manifest, either from `--manifest` or from the
//! `REPO_PUBLISHER_MANIFEST` environment variable.

pub mod check;
pub mod publish;
pub mod validate;

use std::path::Path;

use anyhow::Result;
use repo_publisher::config::{self, PublishManifest};

/// Load a manifest, attaching the path to any error
pub(crate) fn load_manifest(path: &Path) -> Result<PublishManifest> {
    config::from_file(path).map_err(|e| {
        anyhow::anyhow!("Failed to load manifest from {}: {}", path.display(), e)
    })
}
