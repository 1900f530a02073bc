//! Phase 3: Importer Repodata Copy
//!
//! When the importer left a `repodata` directory in its working directory,
//! that tree replaces the one in the publisher's working directory. This is
//! a wholesale replacement, not a merge: an existing target tree is deleted
//! before the copy.
//!
//! A missing source tree means there is nothing to copy. A failed copy is
//! logged and the publish carries on.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, error, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Name of the metadata directory inside a working directory
pub const REPODATA_DIR: &str = "repodata";

/// What happened to the repodata tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepodataCopy {
    Copied,
    /// No importer tree to copy
    Skipped,
    Failed,
}

/// Execute Phase 3: copy `<src>/repodata` over `<tgt>/repodata`
pub fn execute(src_working_dir: Option<&Path>, tgt_working_dir: &Path) -> RepodataCopy {
    let Some(src_working_dir) = src_working_dir else {
        debug!("No importer working directory; skipping repodata copy");
        return RepodataCopy::Skipped;
    };
    match copy_repodata(src_working_dir, tgt_working_dir) {
        Ok(true) => RepodataCopy::Copied,
        Ok(false) => RepodataCopy::Skipped,
        Err(err) => {
            error!("{}", err);
            RepodataCopy::Failed
        }
    }
}

/// Replace the target repodata tree with the source one
///
/// Returns `Ok(false)` when the source has no repodata.
pub fn copy_repodata(src_working_dir: &Path, tgt_working_dir: &Path) -> Result<bool> {
    let src = src_working_dir.join(REPODATA_DIR);
    if !src.exists() {
        debug!("No repodata dir to copy at {}", src.display());
        return Ok(false);
    }
    let dst = tgt_working_dir.join(REPODATA_DIR);

    replace_tree(&src, &dst).map_err(|e| Error::MetadataCopyFailure {
        src: src_working_dir.to_path_buf(),
        dst: tgt_working_dir.to_path_buf(),
        message: e.to_string(),
    })?;

    info!(
        "Copied repodata from {} to {}",
        src_working_dir.display(),
        tgt_working_dir.display()
    );
    Ok(true)
}

fn replace_tree(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::symlink_metadata(dst) {
        Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(dst)?,
        Ok(_) => fs::remove_file(dst)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::other(format!("{}: {}", entry.path().display(), e)))?;
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
