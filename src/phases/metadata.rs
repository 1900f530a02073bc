//! Phase 4: Repository Metadata
//!
//! Building repository metadata (the `repodata` index) is delegated to a
//! [`MetadataGenerator`]. The generator may read and write the working
//! directory freely and reports its own progress under [`Phase::Metadata`].
//!
//! [`ExistingMetadata`] is the generator used when nothing else is plugged
//! in: it builds nothing and publishes whatever `repodata` the working
//! directory already holds, typically the tree copied in Phase 3.

use log::{info, warn};

use crate::config::{PluginConfig, Repository};
use crate::error::Result;
use crate::phases::repodata::REPODATA_DIR;
use crate::progress::{Phase, PhaseProgress, ProgressReporter};

/// Produces or finalizes repository metadata in a working directory
pub trait MetadataGenerator {
    fn generate(
        &self,
        repository: &Repository,
        reporter: &mut ProgressReporter<'_>,
        config: &PluginConfig,
    ) -> Result<()>;
}

/// Reuses the metadata already present in the working directory
#[derive(Debug, Default, Clone, Copy)]
pub struct ExistingMetadata;

impl MetadataGenerator for ExistingMetadata {
    fn generate(
        &self,
        repository: &Repository,
        reporter: &mut ProgressReporter<'_>,
        config: &PluginConfig,
    ) -> Result<()> {
        let mut progress = PhaseProgress::in_progress(0);
        reporter.update(Phase::Metadata, progress.clone());

        if config.generate_metadata() {
            warn!(
                "generate_metadata is set for repo {} but no metadata generator is configured; publishing existing metadata",
                repository.id
            );
        }

        let repodata = repository.working_dir.join(REPODATA_DIR);
        if repodata.is_dir() {
            info!("Using existing metadata at {}", repodata.display());
        } else {
            warn!(
                "Repo {} has no metadata at {}",
                repository.id,
                repodata.display()
            );
        }

        progress.finish();
        reporter.update(Phase::Metadata, progress);
        Ok(())
    }
}

/// Execute Phase 4: run the metadata generator
pub fn execute(
    generator: &dyn MetadataGenerator,
    repository: &Repository,
    reporter: &mut ProgressReporter<'_>,
    config: &PluginConfig,
) -> Result<()> {
    info!("Generating metadata for repo {}", repository.id);
    generator.generate(repository, reporter, config)
}
