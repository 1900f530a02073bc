//! Implementation of the phases of a repository publish.
//!
//! ## Overview
//!
//! A publish runs these phases in order, all on the calling thread:
//! 1. Packages - Link every package unit into the working directory
//! 2. Distribution - Link every file of every distribution tree unit
//! 3. Repodata - Copy pre-built `repodata` from the importer, when present
//! 4. Metadata - Hand the working directory to the metadata generator
//! 5. Publish - Expose the working directory under the HTTPS publish root
//!
//! Phases 1, 2, 4 and 5 report progress under their own phase name. Phase 3
//! is best-effort and only logs.

use crate::unit::ContentUnit;

// Phase modules
pub mod distribution;
pub mod metadata;
pub mod orchestrator;
pub mod packages;
pub mod publish;
pub mod repodata;

// Ordinal aliases used by the orchestrator
pub use distribution as phase2;
pub use metadata as phase4;
pub use packages as phase1;
pub use publish as phase5;
pub use repodata as phase3;

/// Units of a repository split by how they are published
#[derive(Debug, Default)]
pub struct UnitPartition<'a> {
    /// Units linked one file each
    pub packages: Vec<&'a ContentUnit>,
    /// Aggregate units whose files are linked individually
    pub distributions: Vec<&'a ContentUnit>,
}

impl<'a> UnitPartition<'a> {
    /// Split units into packages and distribution trees; errata are dropped
    pub fn new(units: &'a [ContentUnit]) -> Self {
        let mut partition = Self::default();
        for unit in units {
            if unit.is_distribution() {
                partition.distributions.push(unit);
            } else if unit.is_package() {
                partition.packages.push(unit);
            }
        }
        partition
    }
}
