//! Property-based tests for path manipulation functions.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{split_path, strip_leading_separator, strip_trailing_separator};
    use proptest::prelude::*;
    use std::path::{Path, PathBuf};

    proptest! {
        /// Property: split_path never yields empty segments or separators
        #[test]
        fn split_path_segments_are_clean(input in "[a-z/]{0,24}") {
            for segment in split_path(&input) {
                prop_assert!(!segment.is_empty());
                prop_assert!(!segment.contains('/'));
            }
        }

        /// Property: joining the segments and splitting again is stable
        #[test]
        fn split_path_is_idempotent(input in "[a-z0-9/]{0,24}") {
            let once = split_path(&input);
            let joined = once.join("/");
            prop_assert_eq!(split_path(&joined), once);
        }

        /// Property: extra separators do not change the segments
        #[test]
        fn split_path_ignores_repeated_separators(parts in prop::collection::vec("[a-z]{1,5}", 0..5)) {
            let plain = parts.join("/");
            let noisy = format!("//{}///", parts.join("//"));
            prop_assert_eq!(split_path(&plain), split_path(&noisy));
        }

        /// Property: strip_leading_separator output never starts with '/'
        #[test]
        fn strip_leading_separator_removes_all(prefix in "/{0,4}", rest in "[a-z][a-z/]{0,12}") {
            let input = format!("{}{}", prefix, rest);
            let stripped = strip_leading_separator(&input);
            prop_assert!(!stripped.starts_with('/'));
            prop_assert_eq!(stripped, rest.as_str());
        }

        /// Property: a stripped relative path stays under the root it is joined to
        #[test]
        fn stripped_path_joins_under_root(rest in "/{0,3}[a-z]{1,6}(/[a-z]{1,6}){0,3}") {
            let root = Path::new("/srv/published");
            prop_assert!(root.join(strip_leading_separator(&rest)).starts_with(root));
        }

        /// Property: trailing separators are dropped without touching components
        #[test]
        fn strip_trailing_separator_keeps_components(parts in prop::collection::vec("[a-z]{1,5}", 1..5), slashes in "/{0,3}") {
            let plain = format!("/{}", parts.join("/"));
            let input = PathBuf::from(format!("{}{}", plain, slashes));
            let stripped = strip_trailing_separator(&input);
            prop_assert_eq!(&stripped, &PathBuf::from(&plain));
            prop_assert!(!stripped.to_string_lossy().ends_with('/'));
        }
    }
}
