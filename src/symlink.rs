//! # Symlink Synchronization
//!
//! Reconciles a directory's links with the set of items that should be
//! published in it. Content is never copied: every published entry is a
//! symbolic link back into content storage.
//!
//! ## Per-item rule
//!
//! 1. A relative path containing `..` is an error; links never land
//!    outside the root.
//! 2. A missing source is recorded as an error and nothing is linked.
//! 3. A non-symlink already sitting at the link path is an error. It is
//!    never removed.
//! 4. A symlink already pointing at the source is left alone.
//! 5. A symlink pointing anywhere else is removed and recreated.
//! 6. Missing parent directories are created first.
//!
//! Failures are recorded per item and the batch always runs to completion.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use log::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::path::strip_trailing_separator;
use crate::progress::{Phase, PhaseProgress, ProgressReporter};
use crate::report::ErrorDetail;

/// One entry to publish: a stored file and where it should appear
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishItem {
    /// Absolute path into content storage
    pub source_path: PathBuf,
    /// Path relative to the publish root
    pub relative_path: PathBuf,
}

impl PublishItem {
    pub fn new(source_path: impl Into<PathBuf>, relative_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            relative_path: relative_path.into(),
        }
    }

    /// Whether the relative path climbs out of the root it is joined to
    pub fn escapes_root(&self) -> bool {
        self.relative_path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
    }

    /// Location of the link for this item under `root`
    pub fn link_path(&self, root: &Path) -> PathBuf {
        let relative: PathBuf = self
            .relative_path
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect();
        strip_trailing_separator(&root.join(relative))
    }
}

/// What [`create_symlink`] did to the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    Created,
    /// A link pointing elsewhere was removed and recreated
    Replaced,
    /// The link was already correct; nothing was touched
    Unchanged,
}

/// Result of a batch synchronization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub errors: Vec<ErrorDetail>,
    pub created: usize,
    pub replaced: usize,
    pub unchanged: usize,
}

impl SyncOutcome {
    /// True when every item was linked
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of items that ended up correctly linked
    pub fn linked(&self) -> usize {
        self.created + self.replaced + self.unchanged
    }

    /// Number of items that changed something on disk
    pub fn mutations(&self) -> usize {
        self.created + self.replaced
    }

    fn record(&mut self, action: LinkAction) {
        match action {
            LinkAction::Created => self.created += 1,
            LinkAction::Replaced => self.replaced += 1,
            LinkAction::Unchanged => self.unchanged += 1,
        }
    }
}

/// Link every item under `root`, reporting progress under `phase`
///
/// The phase is pushed once before the first item and again after every
/// item. It is marked finished only when no item failed; either way
/// `items_left` ends at zero.
pub fn synchronize(
    items: &[PublishItem],
    root: &Path,
    phase: Phase,
    reporter: &mut ProgressReporter<'_>,
) -> SyncOutcome {
    info!(
        "Synchronizing {} {} items into {}",
        items.len(),
        phase,
        root.display()
    );

    let mut progress = PhaseProgress::in_progress(items.len());
    reporter.update(phase, progress.clone());

    let mut outcome = SyncOutcome::default();
    for item in items {
        let link = item.link_path(root);
        match link_item(item, &link) {
            Ok(action) => {
                progress.record_success();
                outcome.record(action);
            }
            Err(err) => {
                error!("{}", err);
                let detail = ErrorDetail::new(&item.source_path, &link, &err);
                progress.record_error(detail.clone());
                outcome.errors.push(detail);
            }
        }
        reporter.update(phase, progress.clone());
    }

    if outcome.success() {
        progress.finish();
        reporter.update(phase, progress);
    } else {
        error!(
            "Unable to publish {} of {} {} items",
            outcome.errors.len(),
            items.len(),
            phase
        );
    }
    outcome
}

fn link_item(item: &PublishItem, link: &Path) -> Result<LinkAction> {
    if item.escapes_root() {
        return Err(Error::LinkCreationFailure {
            link: link.to_path_buf(),
            source_path: item.source_path.clone(),
            message: format!(
                "relative path {} leaves the publish directory",
                item.relative_path.display()
            ),
        });
    }
    if !item.source_path.exists() {
        return Err(Error::SourceMissing {
            path: item.source_path.clone(),
        });
    }
    debug!(
        "Unit exists at: {} we need to symlink to: {}",
        item.source_path.display(),
        link.display()
    );
    create_symlink(&item.source_path, link)
}

/// Make `link` a symlink to `source`, replacing a link that points elsewhere
///
/// Refuses to touch anything at `link` that is not itself a symlink.
pub fn create_symlink(source: &Path, link: &Path) -> Result<LinkAction> {
    let link = strip_trailing_separator(link);
    let link_failure = |e: io::Error| Error::LinkCreationFailure {
        link: link.clone(),
        source_path: source.to_path_buf(),
        message: e.to_string(),
    };

    let mut action = LinkAction::Created;
    match fs::symlink_metadata(&link) {
        Ok(metadata) => {
            if !metadata.file_type().is_symlink() {
                return Err(Error::UnexpectedExistingEntry { path: link.clone() });
            }
            let existing = fs::read_link(&link).map_err(link_failure)?;
            if existing == source {
                return Ok(LinkAction::Unchanged);
            }
            warn!(
                "Removing <{}> since it was pointing to <{}> and not <{}>",
                link.display(),
                existing.display(),
                source.display()
            );
            remove_link(&link).map_err(link_failure)?;
            action = LinkAction::Replaced;
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(link_failure(e)),
    }

    if let Some(parent) = link.parent() {
        create_dirs(parent).map_err(link_failure)?;
    }

    debug!(
        "creating symlink {} pointing to {}",
        link.display(),
        source.display()
    );
    make_symlink(source, &link).map_err(link_failure)?;
    Ok(action)
}

/// Create `target` and its parents
///
/// Another publisher may create the same directory concurrently, so
/// `AlreadyExists` is not an error. Everything else is.
pub fn create_dirs(target: &Path) -> io::Result<()> {
    match fs::create_dir_all(target) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => {
            error!(
                "Unable to create directories for: {}: {}",
                target.display(),
                e
            );
            Err(e)
        }
    }
}

#[cfg(unix)]
fn make_symlink(source: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, link)
}

#[cfg(windows)]
fn make_symlink(source: &Path, link: &Path) -> io::Result<()> {
    if source.is_dir() {
        std::os::windows::fs::symlink_dir(source, link)
    } else {
        std::os::windows::fs::symlink_file(source, link)
    }
}

#[cfg(unix)]
fn remove_link(link: &Path) -> io::Result<()> {
    fs::remove_file(link)
}

#[cfg(windows)]
fn remove_link(link: &Path) -> io::Result<()> {
    fs::remove_file(link).or_else(|_| fs::remove_dir(link))
}
