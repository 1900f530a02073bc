//! Phase 5: HTTPS Publish
//!
//! Exposes the assembled working directory to consumers with a single link:
//! `<https_publish_dir>/repos/<relative path>` → working directory. The
//! link follows the same link-or-replace rule as individual items.
//!
//! A failure here is logged and recorded in the `publish_https` phase but
//! does not turn a successful publish report into a failed one.

use std::path::{Path, PathBuf};

use log::{error, info};

use crate::config::{PluginConfig, Repository};
use crate::defaults::{self, REPOS_DIR};
use crate::path::{strip_leading_separator, strip_trailing_separator};
use crate::progress::{Phase, PhaseProgress, ProgressReporter};
use crate::report::ErrorDetail;
use crate::symlink::create_symlink;

/// Where a repository is exposed under a publish root
pub fn repo_publish_dir(publish_root: &Path, repository: &Repository, config: &PluginConfig) -> PathBuf {
    let relative = strip_leading_separator(repository.relative_path(config));
    strip_trailing_separator(&publish_root.join(REPOS_DIR).join(relative))
}

/// Execute Phase 5: link the working directory into the HTTPS publish root
///
/// Returns the resolved publish directory whether or not linking succeeded.
pub fn execute(
    repository: &Repository,
    config: &PluginConfig,
    reporter: &mut ProgressReporter<'_>,
) -> PathBuf {
    let publish_root = defaults::https_publish_dir(config);
    let publish_dir = repo_publish_dir(&publish_root, repository, config);
    info!(
        "Using https_publish_dir: {}, relative path: {}",
        publish_root.display(),
        repository.relative_path(config)
    );
    info!(
        "Publishing repo <{}> to <{}>",
        repository.id,
        publish_dir.display()
    );

    let mut progress = PhaseProgress::in_progress(1);
    reporter.update(Phase::PublishHttps, progress.clone());

    match create_symlink(&repository.working_dir, &publish_dir) {
        Ok(_) => {
            progress.record_success();
            progress.finish();
        }
        Err(err) => {
            error!("Unable to publish repo <{}>: {}", repository.id, err);
            progress.record_error(ErrorDetail::new(
                &repository.working_dir,
                &publish_dir,
                &err,
            ));
        }
    }
    reporter.update(Phase::PublishHttps, progress);
    publish_dir
}
