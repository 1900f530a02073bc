//! Orchestrator for the complete publish operation
//!
//! This module coordinates all phases to provide a clean API for publishing
//! one repository: links, distribution files, metadata and the HTTPS link.

use log::{error, info};

use super::{phase1, phase2, phase3, phase4, phase5, UnitPartition};
use crate::config::{PluginConfig, Repository};
use crate::error::Result;
use crate::phases::metadata::{ExistingMetadata, MetadataGenerator};
use crate::progress::{ProgressReporter, ProgressSink};
use crate::report::{ErrorDetail, PublishDetails, PublishReport, PublishSummary};
use crate::symlink::create_dirs;
use crate::unit::ContentUnit;

/// Publishes repositories using a pluggable metadata generator
pub struct Publisher {
    metadata: Box<dyn MetadataGenerator>,
}

impl Default for Publisher {
    fn default() -> Self {
        Self::new(Box::new(ExistingMetadata))
    }
}

impl Publisher {
    pub fn new(metadata: Box<dyn MetadataGenerator>) -> Self {
        Self { metadata }
    }

    /// Execute the complete publish operation
    ///
    /// This orchestrates the publish pipeline:
    /// 1. Link package units into the working directory
    /// 2. Link distribution tree files into the working directory
    /// 3. Copy importer repodata, if any
    /// 4. Generate or finalize metadata
    /// 5. Link the working directory under the HTTPS publish root
    ///
    /// Item failures from steps 1 and 2 produce a failure report rather than
    /// an `Err`. A failed HTTPS link (step 5) is logged and recorded in its
    /// phase progress only; it does not make the report a failure. `Err` is
    /// reserved for a missing working directory that cannot be created and
    /// for errors raised by the metadata generator.
    pub fn publish(
        &self,
        repository: &Repository,
        units: &[ContentUnit],
        config: &PluginConfig,
        sink: &mut dyn ProgressSink,
    ) -> Result<PublishReport> {
        let partition = UnitPartition::new(units);
        info!(
            "Publish on {} invoked. {} existing units, {} of which are supported to be published.",
            repository.id,
            units.len(),
            partition.packages.len()
        );

        create_dirs(&repository.working_dir)?;
        let mut reporter = ProgressReporter::new(sink);

        // Phase 1: Packages
        let packages = phase1::execute(&partition.packages, &repository.working_dir, &mut reporter);
        if !packages.success() {
            error!("Unable to publish {} items", packages.errors.len());
        }

        // Phase 2: Distribution files
        let distribution = phase2::execute(
            &partition.distributions,
            &repository.working_dir,
            &mut reporter,
        );
        if !distribution.success() {
            error!(
                "Unable to publish distribution tree {} items",
                distribution.errors.len()
            );
        }

        // Phase 3: Importer repodata
        phase3::execute(
            repository.importer_working_dir.as_deref(),
            &repository.working_dir,
        );

        // Phase 4: Metadata
        phase4::execute(self.metadata.as_ref(), repository, &mut reporter, config)?;

        // Phase 5: HTTPS publish
        let repo_publish_dir = phase5::execute(repository, config, &mut reporter);

        let published = packages.linked() + distribution.linked();
        let errors: Vec<ErrorDetail> = packages
            .errors
            .into_iter()
            .chain(distribution.errors)
            .collect();

        let summary = PublishSummary {
            repo_publish_dir,
            num_units_attempted: published + errors.len(),
            num_units_published: published,
            num_units_errors: errors.len(),
        };
        let details = PublishDetails { errors };
        info!(
            "Publish complete: summary = <{:?}>, errors = <{}>",
            summary,
            details.errors.len()
        );

        if details.errors.is_empty() {
            Ok(PublishReport::success(summary, details))
        } else {
            Ok(PublishReport::failure(summary, details))
        }
    }
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher").finish_non_exhaustive()
    }
}
