//! Default values for repo-publisher configuration.
//!
//! This module provides centralized default values used across the library
//! and the CLI, ensuring consistency and avoiding duplication.

use std::path::PathBuf;

use crate::config::PluginConfig;

/// Publish root used when a configuration does not set `https_publish_dir`.
pub const DEFAULT_HTTPS_PUBLISH_DIR: &str = "/var/lib/repo-publisher/published";

/// Sub-directory of the publish root that holds repository links.
pub const REPOS_DIR: &str = "repos";

/// Environment variable naming the default manifest for CLI commands.
pub const MANIFEST_ENV: &str = "REPO_PUBLISHER_MANIFEST";

/// Returns the HTTPS publish root for a configuration.
///
/// The `https_publish_dir` key overrides the built-in default, which is
/// mostly useful for tests and non-standard installations.
pub fn https_publish_dir(config: &PluginConfig) -> PathBuf {
    config
        .https_publish_dir()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HTTPS_PUBLISH_DIR))
}
