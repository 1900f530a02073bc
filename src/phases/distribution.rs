//! Phase 2: Distribution Tree Links
//!
//! A distribution unit is an aggregate: its payload is a list of files
//! stored under the unit's `storage_path`. Every file is linked on its own,
//! at the same relative path under the working directory, and all files of
//! all units share the `distribution` progress phase.

use std::path::Path;

use log::{error, info};

use crate::path::strip_leading_separator;
use crate::progress::{Phase, ProgressReporter};
use crate::symlink::{self, PublishItem, SyncOutcome};
use crate::unit::ContentUnit;

/// Flatten distribution units into one publish item per file
///
/// A unit without a file list is logged and contributes nothing.
pub fn items(units: &[&ContentUnit]) -> Vec<PublishItem> {
    let mut items = Vec::new();
    for unit in units {
        let Some(files) = &unit.metadata.files else {
            error!(
                "No distribution files found for unit at {}",
                unit.storage_path.display()
            );
            continue;
        };
        info!("Found {} distribution files to symlink", files.len());
        items.extend(files.iter().map(|file| {
            let relative = strip_leading_separator(&file.relativepath);
            PublishItem::new(unit.storage_path.join(relative), relative)
        }));
    }
    items
}

/// Execute Phase 2: link every distribution file under `working_dir`
pub fn execute(
    units: &[&ContentUnit],
    working_dir: &Path,
    reporter: &mut ProgressReporter<'_>,
) -> SyncOutcome {
    info!(
        "Process symlinking distribution files with {} units to {} dir",
        units.len(),
        working_dir.display()
    );
    symlink::synchronize(&items(units), working_dir, Phase::Distribution, reporter)
}
