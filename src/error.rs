//! # Error Handling
//!
//! This module defines the centralized error type for `repo-publisher`. It
//! uses the `thiserror` library to build a single `Error` enum covering every
//! failure the publisher can observe, with messages that carry enough context
//! (paths, repository ids) to act on without a debugger.
//!
//! ## Recoverable vs. fatal
//!
//! Most variants are produced per item while synchronizing links and are
//! recovered locally: the synchronizer logs them, turns them into an
//! [`ErrorDetail`](crate::report::ErrorDetail) and moves on to the next item.
//! These are:
//!
//! - `SourceMissing`
//! - `UnexpectedExistingEntry`
//! - `LinkCreationFailure`
//! - `MetadataCopyFailure`
//!
//! `TrieConstructionConflict` is different. It means two related repositories
//! that validation should already have kept apart claim overlapping paths. It
//! is always propagated to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for repo-publisher operations
#[derive(Error, Debug)]
pub enum Error {
    /// A content file referenced by a unit does not exist in storage.
    #[error("Source path: {} is missing", path.display())]
    SourceMissing { path: PathBuf },

    /// The link location is occupied by something that is not a symlink.
    ///
    /// The synchronizer never overwrites regular files or directories.
    #[error("{} is not a symbolic link as expected", path.display())]
    UnexpectedExistingEntry { path: PathBuf },

    /// The OS refused to create a link or one of its parent directories.
    #[error("Unable to create symlink {} pointing to {}: {message}", link.display(), source_path.display())]
    LinkCreationFailure {
        link: PathBuf,
        source_path: PathBuf,
        message: String,
    },

    /// Copying a `repodata` tree between working directories failed.
    #[error("Unable to copy repodata directory from {} to {}: {message}", src.display(), dst.display())]
    MetadataCopyFailure {
        src: PathBuf,
        dst: PathBuf,
        message: String,
    },

    /// Two related repositories claim overlapping publish paths.
    ///
    /// Validation is expected to reject such overlaps before the lookup trie
    /// is ever built, so reaching this is a broken precondition.
    #[error("Relative URL lookup table encountered a conflict with repo <{repo_id}> with relative_url <{relative_url}>: {message}")]
    TrieConstructionConflict {
        repo_id: String,
        relative_url: String,
        /// Repository already holding the contested path, when one is known
        conflicting_repo_id: Option<String>,
        message: String,
    },

    /// An error occurred while parsing a publish manifest.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the manifest
        hint: Option<String>,
    },

    /// A distributor configuration was rejected.
    #[error("Configuration validation error: {message}")]
    ConfigValidation { message: String },

    /// The metadata collaborator failed.
    #[error("Metadata generation error for repo {repo_id}: {message}")]
    Metadata { repo_id: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error must abort the caller instead of being recorded.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::TrieConstructionConflict { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
