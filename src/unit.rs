//! Content units handed to the publisher
//!
//! Units live in an external content store. The publisher only ever reads
//! their `storage_path`; it never copies, moves or deletes them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const RPM_TYPE_ID: &str = "rpm";
pub const SRPM_TYPE_ID: &str = "srpm";
pub const DRPM_TYPE_ID: &str = "drpm";
pub const DISTRO_TYPE_ID: &str = "distribution";
pub const ERRATA_TYPE_ID: &str = "erratum";

/// A file belonging to an aggregate (distribution tree) unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionFile {
    pub relativepath: String,
}

/// Unit metadata fields the publisher cares about
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitMetadata {
    #[serde(default)]
    pub relativepath: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    /// Sub-files of a distribution tree unit
    #[serde(default)]
    pub files: Option<Vec<DistributionFile>>,
}

/// Unit key fields the publisher cares about
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitKey {
    #[serde(default, rename = "fileName")]
    pub file_name: Option<String>,
}

/// A content unit associated with the repository being published
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentUnit {
    pub type_id: String,
    pub storage_path: PathBuf,
    #[serde(default)]
    pub metadata: UnitMetadata,
    #[serde(default)]
    pub unit_key: UnitKey,
}

impl ContentUnit {
    pub fn new(type_id: impl Into<String>, storage_path: impl Into<PathBuf>) -> Self {
        Self {
            type_id: type_id.into(),
            storage_path: storage_path.into(),
            metadata: UnitMetadata::default(),
            unit_key: UnitKey::default(),
        }
    }

    /// Whether this is an aggregate distribution tree unit
    pub fn is_distribution(&self) -> bool {
        self.type_id == DISTRO_TYPE_ID
    }

    /// Whether this unit is linked as a single package file
    ///
    /// Everything except distribution trees and errata qualifies.
    pub fn is_package(&self) -> bool {
        self.type_id != DISTRO_TYPE_ID && self.type_id != ERRATA_TYPE_ID
    }

    /// Path of this unit relative to the publish root.
    ///
    /// Precedence: `metadata.relativepath`, `metadata.filename`,
    /// `unit_key.fileName`, then the basename of `storage_path`.
    pub fn relative_path(&self) -> PathBuf {
        if let Some(path) = &self.metadata.relativepath {
            return PathBuf::from(path);
        }
        if let Some(name) = &self.metadata.filename {
            return PathBuf::from(name);
        }
        if let Some(name) = &self.unit_key.file_name {
            return PathBuf::from(name);
        }
        self.storage_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_default()
    }
}
