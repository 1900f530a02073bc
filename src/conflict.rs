//! # Relative URL Conflict Detection
//!
//! Every published repository occupies a relative URL under the publish root,
//! e.g. `rhel/6/i386`. Before a repository is accepted, its relative URL is
//! checked against the URLs of all related repositories so that no two
//! repositories end up serving from the same directory, and no repository
//! is published inside another one's tree.
//!
//! ## Rules
//!
//! The known URLs are loaded into a [`PathTrie`] keyed by path segment. Each
//! registered URL ends in a [`TrieNode::Leaf`]. A candidate conflicts when:
//!
//! - it is exactly a registered URL, or
//! - it descends from a registered URL (`rhel/6` registered, `rhel/6/i386`
//!   requested).
//!
//! A candidate that is an *ancestor* of registered URLs does not conflict:
//! with `rhel/6/i386` registered, `rhel/6` is free, as is the sibling
//! `rhel/6/x86_64`.
//!
//! The trie is rebuilt from the related repositories on every check. Nothing
//! is persisted between runs.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, error};

use crate::config::RelatedRepository;
use crate::error::{Error, Result};
use crate::path::split_path;

/// A relative URL registered by a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRecord {
    pub repo_id: String,
    pub relative_url: String,
}

impl PublishRecord {
    pub fn new(repo_id: impl Into<String>, relative_url: impl Into<String>) -> Self {
        Self {
            repo_id: repo_id.into(),
            relative_url: relative_url.into(),
        }
    }
}

/// Marker stored on the node where a registered URL ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
    pub repo_id: String,
    pub relative_url: String,
}

/// A node in the path trie
///
/// A leaf never has children and a branch never carries a repository, so
/// "published here" and "something is published below here" cannot both
/// hold for the same node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieNode {
    Branch(BTreeMap<String, TrieNode>),
    Leaf(Terminal),
}

impl TrieNode {
    fn branch() -> Self {
        TrieNode::Branch(BTreeMap::new())
    }

    fn insert(&mut self, segments: &[&str], record: &PublishRecord) -> Result<()> {
        let Some((head, rest)) = segments.split_first() else {
            match &*self {
                TrieNode::Leaf(existing) => {
                    return Err(construction_conflict(
                        record,
                        Some(existing),
                        format!(
                            "This repo <{}> conflicts with repo <{}>",
                            record.repo_id, existing.repo_id
                        ),
                    ));
                }
                TrieNode::Branch(children) if !children.is_empty() => {
                    let sub_dirs: Vec<&str> = children.keys().map(String::as_str).collect();
                    return Err(construction_conflict(
                        record,
                        self.first_terminal(),
                        format!(
                            "This repo <{}> conflicts with an existing repos sub directories, specific sub dirs of conflict are {:?}",
                            record.repo_id, sub_dirs
                        ),
                    ));
                }
                TrieNode::Branch(_) => {}
            }
            *self = TrieNode::Leaf(Terminal {
                repo_id: record.repo_id.clone(),
                relative_url: record.relative_url.clone(),
            });
            return Ok(());
        };

        match self {
            TrieNode::Leaf(existing) => Err(construction_conflict(
                record,
                Some(&*existing),
                format!(
                    "This repo <{}> would be published beneath repo <{}> at <{}>",
                    record.repo_id, existing.repo_id, existing.relative_url
                ),
            )),
            TrieNode::Branch(children) => children
                .entry((*head).to_string())
                .or_insert_with(TrieNode::branch)
                .insert(rest, record),
        }
    }

    /// The first registered repository at or below this node, in key order
    fn first_terminal(&self) -> Option<&Terminal> {
        match self {
            TrieNode::Leaf(terminal) => Some(terminal),
            TrieNode::Branch(children) => children.values().find_map(TrieNode::first_terminal),
        }
    }

    fn count_leaves(&self) -> usize {
        match self {
            TrieNode::Leaf(_) => 1,
            TrieNode::Branch(children) => children.values().map(TrieNode::count_leaves).sum(),
        }
    }
}

fn construction_conflict(
    record: &PublishRecord,
    existing: Option<&Terminal>,
    message: String,
) -> Error {
    let err = Error::TrieConstructionConflict {
        repo_id: record.repo_id.clone(),
        relative_url: record.relative_url.clone(),
        conflicting_repo_id: existing.map(|t| t.repo_id.clone()),
        message,
    };
    error!("{}", err);
    err
}

/// A detected conflict between a candidate URL and a registered one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// The candidate URL that was checked
    pub relative_url: String,
    /// The registered URL it collides with
    pub existing_url: String,
    /// Repository owning `existing_url`
    pub repo_id: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Relative url '{}' conflicts with existing relative_url of '{}' from repo '{}'",
            self.relative_url, self.existing_url, self.repo_id
        )
    }
}

/// Prefix tree over the relative URLs of published repositories
#[derive(Debug, Clone)]
pub struct PathTrie {
    root: TrieNode,
}

impl Default for PathTrie {
    fn default() -> Self {
        Self {
            root: TrieNode::branch(),
        }
    }
}

impl PathTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trie from publish records
    ///
    /// Records whose URL has no segments are skipped. Overlapping records
    /// fail with [`Error::TrieConstructionConflict`]; callers are expected to
    /// have rejected such overlaps already, so this error must be propagated.
    pub fn build<'a, I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a PublishRecord>,
    {
        let mut trie = Self::new();
        for record in records {
            trie.insert(record)?;
        }
        Ok(trie)
    }

    /// Register a single record
    ///
    /// Returns `Ok(false)` when the record has no usable segments and was
    /// skipped.
    pub fn insert(&mut self, record: &PublishRecord) -> Result<bool> {
        let segments = split_path(&record.relative_url);
        if segments.is_empty() {
            debug!(
                "Skipping repo <{}>: relative url {:?} has no path segments",
                record.repo_id, record.relative_url
            );
            return Ok(false);
        }
        self.root.insert(&segments, record)?;
        Ok(true)
    }

    /// Check a candidate URL against the registered ones
    pub fn query(&self, candidate: &str) -> Option<Conflict> {
        let mut node = &self.root;
        for segment in split_path(candidate) {
            match node {
                TrieNode::Leaf(terminal) => return Some(conflict_with(candidate, terminal)),
                TrieNode::Branch(children) => match children.get(segment) {
                    Some(child) => node = child,
                    None => return None,
                },
            }
        }
        match node {
            TrieNode::Leaf(terminal) => Some(conflict_with(candidate, terminal)),
            TrieNode::Branch(_) => None,
        }
    }

    /// Number of registered URLs
    pub fn len(&self) -> usize {
        self.root.count_leaves()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn conflict_with(candidate: &str, terminal: &Terminal) -> Conflict {
    Conflict {
        relative_url: candidate.to_string(),
        existing_url: terminal.relative_url.clone(),
        repo_id: terminal.repo_id.clone(),
    }
}

/// Derive publish records from related repositories
///
/// Repositories without a configuration for this distributor are skipped.
/// Only the first configuration of a repository is considered; its
/// `relative_url` is used, or the repository id when that is unset.
pub fn publish_records(related: &[RelatedRepository]) -> Vec<PublishRecord> {
    related
        .iter()
        .filter_map(|repo| {
            let config = repo.plugin_configs.first()?;
            let relative_url = config.relative_url().unwrap_or(&repo.id);
            Some(PublishRecord::new(repo.id.clone(), relative_url))
        })
        .collect()
}

/// Conflict checker over the current set of related repositories
#[derive(Debug, Clone)]
pub struct ConflictDetector {
    trie: PathTrie,
}

impl ConflictDetector {
    pub fn from_related(related: &[RelatedRepository]) -> Result<Self> {
        let records = publish_records(related);
        let trie = PathTrie::build(&records)?;
        debug!("Built relative url lookup with {} entries", trie.len());
        Ok(Self { trie })
    }

    pub fn check(&self, relative_url: &str) -> Option<Conflict> {
        self.trie.query(relative_url)
    }
}

/// Check one relative URL against the related repositories
pub fn find_conflict(relative_url: &str, related: &[RelatedRepository]) -> Result<Option<Conflict>> {
    Ok(ConflictDetector::from_related(related)?.check(relative_url))
}
