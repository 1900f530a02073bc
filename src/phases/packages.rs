//! Phase 1: Package Links
//!
//! Each package unit becomes one link in the working directory, at the
//! unit's relative path, pointing at its `storage_path`.

use std::path::Path;

use crate::progress::{Phase, ProgressReporter};
use crate::symlink::{self, PublishItem, SyncOutcome};
use crate::unit::ContentUnit;

/// Publish items for a set of package units
pub fn items(units: &[&ContentUnit]) -> Vec<PublishItem> {
    units
        .iter()
        .map(|unit| PublishItem::new(&unit.storage_path, unit.relative_path()))
        .collect()
}

/// Execute Phase 1: link package units under `working_dir`
pub fn execute(
    units: &[&ContentUnit],
    working_dir: &Path,
    reporter: &mut ProgressReporter<'_>,
) -> SyncOutcome {
    symlink::synchronize(&items(units), working_dir, Phase::Packages, reporter)
}
