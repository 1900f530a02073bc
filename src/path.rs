//! Path manipulation utilities for repo-publisher

use std::path::{Path, PathBuf};

/// Split a relative URL into its non-empty `/`-separated segments
///
/// Leading, trailing and repeated separators produce no segments, so `"/"`
/// and `""` both yield an empty list.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|piece| !piece.is_empty()).collect()
}

/// Strip leading separators so the path can be joined under a root
pub fn strip_leading_separator(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Drop trailing separators from a filesystem path
///
/// `/pub/work/dir/` becomes `/pub/work/dir`. A link cannot be created at a
/// path spelled with a trailing separator.
pub fn strip_trailing_separator(path: &Path) -> PathBuf {
    path.components().collect()
}
