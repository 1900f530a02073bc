//! Shared test utilities for integration and E2E tests.
//!
//! [`PublishFixture`] lays out a content store, a working directory root and
//! a publish root inside one temporary directory, and writes manifests that
//! point into it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = PublishFixture::new();
//! let manifest = fixture.manifest(vec![fixture.rpm("a-1.0.rpm")], vec![]);
//! let path = fixture.write_manifest(&manifest);
//! ```

#![allow(dead_code)]

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

use repo_publisher::config::{PluginConfig, PublishManifest, RelatedRepository, Repository};
use repo_publisher::unit::{ContentUnit, DistributionFile, DISTRO_TYPE_ID, RPM_TYPE_ID};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{related, PublishFixture, RELATIVE_URL, REPO_ID};
}

/// Repository id used by fixture manifests
pub const REPO_ID: &str = "rhel-6-i386";

/// Relative URL used by fixture manifests
pub const RELATIVE_URL: &str = "rhel/6/i386";

/// A related repository with a single configuration
pub fn related(id: &str, relative_url: &str) -> RelatedRepository {
    RelatedRepository::new(
        id,
        vec![PluginConfig::new()
            .with("relative_url", relative_url)
            .with("http", false)
            .with("https", true)],
    )
}

/// Temporary publish environment
pub struct PublishFixture {
    temp_dir: assert_fs::TempDir,
}

impl PublishFixture {
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("store")
            .create_dir_all()
            .expect("Failed to create content store");
        temp_dir
            .child("published")
            .create_dir_all()
            .expect("Failed to create publish root");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.temp_dir.path().join(rel)
    }

    /// Write a file into the content store and return its path
    pub fn stored(&self, rel: &str) -> PathBuf {
        let child = self.temp_dir.child("store").child(rel);
        child.write_str(rel).expect("Failed to write stored file");
        child.path().to_path_buf()
    }

    /// A package unit backed by a stored file
    pub fn rpm(&self, name: &str) -> ContentUnit {
        ContentUnit::new(RPM_TYPE_ID, self.stored(name))
    }

    /// A distribution unit whose files are all stored
    pub fn distribution(&self, name: &str, files: &[&str]) -> ContentUnit {
        for file in files {
            self.stored(&format!("{}/{}", name, file));
        }
        let mut unit = ContentUnit::new(DISTRO_TYPE_ID, self.join("store").join(name));
        unit.metadata.files = Some(
            files
                .iter()
                .map(|f| DistributionFile {
                    relativepath: f.to_string(),
                })
                .collect(),
        );
        unit
    }

    pub fn working_dir(&self) -> PathBuf {
        self.join("work").join(REPO_ID)
    }

    pub fn publish_root(&self) -> PathBuf {
        self.join("published")
    }

    /// Where the fixture repository ends up exposed
    pub fn repo_publish_dir(&self) -> PathBuf {
        self.publish_root().join("repos").join(RELATIVE_URL)
    }

    pub fn config(&self) -> PluginConfig {
        PluginConfig::new()
            .with("relative_url", RELATIVE_URL)
            .with("http", false)
            .with("https", true)
            .with(
                "https_publish_dir",
                self.publish_root().to_string_lossy().into_owned(),
            )
    }

    pub fn manifest(
        &self,
        units: Vec<ContentUnit>,
        related_repos: Vec<RelatedRepository>,
    ) -> PublishManifest {
        PublishManifest {
            repository: Repository::new(REPO_ID, self.working_dir()),
            config: self.config(),
            units,
            related_repos,
        }
    }

    /// Serialize a manifest into the fixture directory
    pub fn write_manifest(&self, manifest: &PublishManifest) -> PathBuf {
        let yaml = serde_yaml::to_string(manifest).expect("Failed to serialize manifest");
        let child = self.temp_dir.child("manifest.yaml");
        child.write_str(&yaml).expect("Failed to write manifest");
        child.path().to_path_buf()
    }

    /// Write raw manifest text
    pub fn write_manifest_str(&self, content: &str) -> PathBuf {
        let child = self.temp_dir.child("manifest.yaml");
        child.write_str(content).expect("Failed to write manifest");
        child.path().to_path_buf()
    }

    /// A CLI command running in the fixture directory
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("repo-publisher");
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("REPO_PUBLISHER_MANIFEST");
        cmd
    }
}

impl Default for PublishFixture {
    fn default() -> Self {
        Self::new()
    }
}
