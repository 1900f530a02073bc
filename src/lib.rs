//! # Repository Publisher Library
//!
//! This library publishes package repositories onto a filesystem tree. It
//! assembles a repository's working directory out of symbolic links to stored
//! content, then exposes that directory under a publish root where consumers
//! fetch it by its relative URL. It is designed to be used by the
//! `repo-publisher` command-line tool but can also be embedded in a larger
//! repository management service.
//!
//! ## Quick Example
//!
//! ```
//! use repo_publisher::config::{PluginConfig, RelatedRepository};
//! use repo_publisher::conflict;
//!
//! let related = vec![RelatedRepository::new(
//!     "rhel-6",
//!     vec![PluginConfig::new().with("relative_url", "rhel/6")],
//! )];
//!
//! // A repository below an existing one would shadow part of its tree
//! let hit = conflict::find_conflict("rhel/6/updates", &related).unwrap();
//! assert_eq!(hit.unwrap().repo_id, "rhel-6");
//!
//! // An unrelated path is fine
//! assert!(conflict::find_conflict("fedora/20", &related).unwrap().is_none());
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`, `validation`)**: The per-repository distributor
//!   configuration, the publish manifest read by the CLI, and the checks a
//!   configuration must pass before it is accepted.
//! - **Conflict Detection (`conflict`)**: A prefix tree over relative URLs
//!   that rejects a repository whose URL lies at or below another one.
//! - **Link Synchronization (`symlink`)**: Creates, replaces or leaves alone
//!   the symbolic links that make up a published tree, never touching
//!   regular files.
//! - **Progress (`progress`, `report`)**: Per-phase counters pushed to a
//!   caller-supplied sink, and the final publish report.
//! - **Phases (`phases`)**: The publish pipeline.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::orchestrator::Publisher`, which executes:
//!
//! 1.  **Packages**: Link package units into the working directory.
//! 2.  **Distribution**: Link distribution tree files into the working directory.
//! 3.  **Repodata**: Copy the importer's `repodata` tree, if any.
//! 4.  **Metadata**: Run the configured metadata generator.
//! 5.  **Publish**: Link the working directory under the HTTPS publish root.

pub mod config;
pub mod conflict;
pub mod defaults;
pub mod error;
pub mod output;
pub mod path;
pub mod phases;
pub mod progress;
pub mod report;
pub mod symlink;
pub mod unit;
pub mod validation;

#[cfg(test)]
mod conflict_proptest;
#[cfg(test)]
mod path_proptest;
