//! Final publish reports

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One failed item: what was linked, where, and why it failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub source: PathBuf,
    pub target: PathBuf,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>, error: &Error) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            message: error.to_string(),
        }
    }
}

/// Aggregate counts of a publish run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishSummary {
    /// Where the repository was exposed for HTTPS consumers
    pub repo_publish_dir: PathBuf,
    pub num_units_attempted: usize,
    pub num_units_published: usize,
    pub num_units_errors: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishDetails {
    pub errors: Vec<ErrorDetail>,
}

/// Outcome handed back to the caller of a publish
///
/// A failure report has the same shape as a success report; only `success`
/// differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReport {
    pub success: bool,
    pub summary: PublishSummary,
    pub details: PublishDetails,
}

impl PublishReport {
    pub fn success(summary: PublishSummary, details: PublishDetails) -> Self {
        Self {
            success: true,
            summary,
            details,
        }
    }

    pub fn failure(summary: PublishSummary, details: PublishDetails) -> Self {
        Self {
            success: false,
            summary,
            details,
        }
    }
}
