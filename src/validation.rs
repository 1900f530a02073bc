//! # Distributor Configuration Validation
//!
//! Checks a [`PluginConfig`] before a repository is accepted for publishing:
//! required keys, value types, unknown keys, the publish root override, and
//! finally that the repository's relative URL does not collide with any
//! related repository.
//!
//! Certificate contents (`auth_cert`, `auth_ca`, `https_ca`) are only checked
//! for being strings.

use std::path::Path;

use log::{error, info};
use serde_yaml::Value;

use crate::config::{PluginConfig, RelatedRepository};
use crate::conflict;
use crate::error::{Error, Result};

/// Keys every configuration must carry
pub const REQUIRED_CONFIG_KEYS: [&str; 3] = ["relative_url", "http", "https"];

/// Keys a configuration may carry
pub const OPTIONAL_CONFIG_KEYS: [&str; 9] = [
    "protected",
    "auth_cert",
    "auth_ca",
    "https_ca",
    "gpgkey",
    "generate_metadata",
    "checksum_type",
    "skip_content_types",
    "https_publish_dir",
];

/// Checksum types accepted for metadata generation
pub const CHECKSUM_TYPES: [&str; 7] = ["md5", "sha", "sha1", "sha224", "sha256", "sha384", "sha512"];

#[derive(Debug, Clone, Copy)]
enum Expected {
    String,
    Bool,
    List,
}

impl Expected {
    fn name(self) -> &'static str {
        match self {
            Expected::String => "a string",
            Expected::Bool => "a boolean",
            Expected::List => "a list",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Expected::String => value.is_string(),
            Expected::Bool => value.is_bool(),
            Expected::List => value.is_sequence(),
        }
    }
}

fn expected_type(key: &str) -> Option<Expected> {
    match key {
        "relative_url" | "auth_cert" | "auth_ca" | "https_ca" | "gpgkey" | "checksum_type"
        | "https_publish_dir" => Some(Expected::String),
        "http" | "https" | "protected" | "generate_metadata" => Some(Expected::Bool),
        "skip_content_types" => Some(Expected::List),
        _ => None,
    }
}

fn invalid(message: String) -> Error {
    error!("{}", message);
    Error::ConfigValidation { message }
}

fn describe(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{:?}", value))
}

/// Validate a distributor configuration against the related repositories
///
/// Returns [`Error::ConfigValidation`] for a rejected configuration. A
/// [`Error::TrieConstructionConflict`] raised while indexing the related
/// repositories is propagated unchanged.
pub fn validate_config(config: &PluginConfig, related: &[RelatedRepository]) -> Result<()> {
    info!(
        "validate_config invoked, config keys are: {:?}",
        config.keys().collect::<Vec<_>>()
    );

    for key in REQUIRED_CONFIG_KEYS {
        if !config.contains_key(key) {
            return Err(invalid(format!(
                "Missing required configuration key: {}",
                key
            )));
        }
    }

    for key in config.keys() {
        if !REQUIRED_CONFIG_KEYS.contains(&key) && !OPTIONAL_CONFIG_KEYS.contains(&key) {
            return Err(invalid(format!(
                "Configuration key '{}' is not supported",
                key
            )));
        }
        let Some(value) = config.get(key) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        if let Some(expected) = expected_type(key) {
            if !expected.matches(value) {
                return Err(invalid(format!(
                    "{} should be {}; got {} instead",
                    key,
                    expected.name(),
                    describe(value)
                )));
            }
        }
    }

    if let Some(checksum_type) = config.checksum_type() {
        if !CHECKSUM_TYPES.contains(&checksum_type) {
            return Err(invalid(format!(
                "{} is not a valid checksum type",
                checksum_type
            )));
        }
    }

    if let Some(publish_dir) = config.https_publish_dir() {
        validate_publish_dir(&publish_dir)?;
    }

    if let Some(relative_url) = config.relative_url() {
        if let Some(conflict) = conflict::find_conflict(relative_url, related)? {
            info!("{}", conflict);
            return Err(Error::ConfigValidation {
                message: conflict.to_string(),
            });
        }
    }

    Ok(())
}

fn validate_publish_dir(publish_dir: &Path) -> Result<()> {
    if !publish_dir.is_dir() {
        return Err(invalid(format!(
            "Value for 'https_publish_dir' is not an existing directory: {}",
            publish_dir.display()
        )));
    }
    if !can_read_and_write(publish_dir) {
        return Err(invalid(format!(
            "Unable to read & write to specified 'https_publish_dir': {}",
            publish_dir.display()
        )));
    }
    Ok(())
}

/// Access check against the real uid/gid of this process
#[cfg(unix)]
fn can_read_and_write(dir: &Path) -> bool {
    use rustix::fs::{access, Access};
    access(dir, Access::READ_OK | Access::WRITE_OK).is_ok()
}

#[cfg(not(unix))]
fn can_read_and_write(dir: &Path) -> bool {
    std::fs::metadata(dir)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}
