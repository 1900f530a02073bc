//! # Configuration Schema and Parsing
//!
//! This module defines the data structures a publish run is configured with,
//! and the logic for reading them from a YAML publish manifest.
//!
//! ## Key Components
//!
//! - **`PluginConfig`**: The distributor configuration attached to a
//!   repository. It is kept as a loosely-typed key/value map so that
//!   [`validation`](crate::validation) can report wrongly-typed or unknown
//!   keys precisely; typed accessors read the values afterwards.
//!
//! - **`Repository`**: The repository being published, with its working
//!   directory and, optionally, the importer's working directory that may
//!   hold pre-built `repodata`.
//!
//! - **`RelatedRepository`**: Another repository sharing this distributor
//!   type. Only its first plugin configuration is ever consulted.
//!
//! - **`PublishManifest`**: Everything the CLI needs for one run, in a single
//!   YAML document.
//!
//! ## Manifest format
//!
//! ```yaml
//! repository:
//!   id: rhel-6-i386
//!   working_dir: /var/lib/repo-publisher/working/rhel-6-i386
//!   importer_working_dir: /var/lib/repo-publisher/importer/rhel-6-i386
//! config:
//!   relative_url: rhel/6/i386
//!   http: false
//!   https: true
//! units:
//!   - type_id: rpm
//!     storage_path: /var/lib/content/rpm/pkg-1.0.rpm
//! related_repos:
//!   - id: rhel-5-i386
//!     plugin_configs:
//!       - relative_url: rhel/5/i386
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::path::split_path;
use crate::unit::ContentUnit;

/// Distributor configuration as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginConfig(BTreeMap<String, Value>);

impl PluginConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly useful for constructing configs in code
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Insert or replace a key
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Raw value of a key, if set
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether a key is present, regardless of its value
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// All configured keys, in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The configured relative URL
    ///
    /// A value with no path segments (`""`, `"/"`, `"///"`) counts as unset,
    /// so callers fall back to the repository id.
    pub fn relative_url(&self) -> Option<&str> {
        self.get_str("relative_url")
            .filter(|url| !split_path(url).is_empty())
    }

    /// Publish over HTTP
    pub fn http(&self) -> bool {
        self.get_bool("http").unwrap_or(false)
    }

    /// Publish over HTTPS
    pub fn https(&self) -> bool {
        self.get_bool("https").unwrap_or(false)
    }

    /// Whether repository metadata should be rebuilt rather than reused
    pub fn generate_metadata(&self) -> bool {
        self.get_bool("generate_metadata").unwrap_or(false)
    }

    /// Checksum type requested for metadata generation
    pub fn checksum_type(&self) -> Option<&str> {
        self.get_str("checksum_type")
    }

    /// Override of the HTTPS publish root
    pub fn https_publish_dir(&self) -> Option<PathBuf> {
        self.get_str("https_publish_dir").map(PathBuf::from)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }
}

/// The repository being published
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Stable repository identifier
    pub id: String,
    /// Staging directory that receives the links and metadata
    pub working_dir: PathBuf,
    /// Importer working directory that may contain a `repodata` tree
    #[serde(default)]
    pub importer_working_dir: Option<PathBuf>,
}

impl Repository {
    pub fn new(id: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            working_dir: working_dir.into(),
            importer_working_dir: None,
        }
    }

    /// Relative publish path: the configured `relative_url`, or the repository id
    pub fn relative_path<'a>(&'a self, config: &'a PluginConfig) -> &'a str {
        config.relative_url().unwrap_or(&self.id)
    }
}

/// Another repository associated with the same distributor type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedRepository {
    pub id: String,
    /// Configurations of this distributor type on that repository
    #[serde(default)]
    pub plugin_configs: Vec<PluginConfig>,
}

impl RelatedRepository {
    pub fn new(id: impl Into<String>, plugin_configs: Vec<PluginConfig>) -> Self {
        Self {
            id: id.into(),
            plugin_configs,
        }
    }
}

/// A complete publish run description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishManifest {
    pub repository: Repository,
    #[serde(default)]
    pub config: PluginConfig,
    #[serde(default)]
    pub units: Vec<ContentUnit>,
    #[serde(default)]
    pub related_repos: Vec<RelatedRepository>,
}

/// Parse a publish manifest from a YAML string
pub fn parse(yaml_content: &str) -> Result<PublishManifest> {
    serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(
            "A manifest needs a 'repository:' block with 'id' and 'working_dir'".to_string(),
        ),
    })
}

/// Parse a publish manifest from a file
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<PublishManifest> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}
