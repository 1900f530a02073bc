//! Property-based tests for relative URL conflict detection.
//!
//! These tests use proptest to generate random URL trees and verify that
//! the trie agrees with a plain segment-prefix comparison.

#[cfg(test)]
mod proptest_tests {
    use crate::conflict::{PathTrie, PublishRecord};
    use crate::error::Error;
    use proptest::prelude::*;

    fn segments() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z0-9]{1,6}", 1..5)
    }

    fn is_segment_prefix(prefix: &[String], path: &[String]) -> bool {
        prefix.len() <= path.len() && prefix.iter().zip(path).all(|(a, b)| a == b)
    }

    proptest! {
        /// Property: anything at or below a registered URL conflicts
        #[test]
        fn descendants_always_conflict(base in segments(), extra in prop::collection::vec("[a-z0-9]{1,6}", 0..4)) {
            let url = base.join("/");
            let trie = PathTrie::build([&PublishRecord::new("repo", url.clone())]).unwrap();

            let mut candidate = base.clone();
            candidate.extend(extra);
            let conflict = trie.query(&candidate.join("/"));
            prop_assert!(conflict.is_some());
            prop_assert_eq!(conflict.unwrap().existing_url, url);
        }

        /// Property: strict ancestors of a registered URL never conflict
        #[test]
        fn ancestors_never_conflict(base in segments(), cut in 0usize..4) {
            prop_assume!(cut < base.len());
            let trie = PathTrie::build([&PublishRecord::new("repo", base.join("/"))]).unwrap();
            prop_assert!(trie.query(&base[..cut].join("/")).is_none());
        }

        /// Property: surrounding separators do not change the answer
        #[test]
        fn separators_are_insignificant(base in segments()) {
            let trie = PathTrie::build([&PublishRecord::new("repo", base.join("/"))]).unwrap();
            let spelled = format!("/{}//", base.join("//"));
            prop_assert!(trie.query(&spelled).is_some());
        }

        /// Property: a pair where one URL is a segment prefix of the other cannot be indexed
        #[test]
        fn nested_pair_fails_construction(base in segments(), extra in segments(), reversed in any::<bool>()) {
            let outer = PublishRecord::new("outer", base.join("/"));
            let mut inner_segments = base.clone();
            inner_segments.extend(extra);
            let inner = PublishRecord::new("inner", inner_segments.join("/"));

            let records = if reversed { vec![&inner, &outer] } else { vec![&outer, &inner] };
            let result = PathTrie::build(records);
            let is_conflict = matches!(result, Err(Error::TrieConstructionConflict { .. }));
            prop_assert!(is_conflict);
        }

        /// Property: the trie agrees with a segment-prefix check over a valid set
        #[test]
        fn query_matches_prefix_oracle(
            registered in prop::collection::vec(segments(), 1..6),
            candidate in segments(),
        ) {
            // Keep only a prefix-free subset so construction succeeds
            let mut accepted: Vec<Vec<String>> = Vec::new();
            for url in registered {
                let overlaps = accepted
                    .iter()
                    .any(|other| is_segment_prefix(other, &url) || is_segment_prefix(&url, other));
                if !overlaps {
                    accepted.push(url);
                }
            }
            let records: Vec<PublishRecord> = accepted
                .iter()
                .enumerate()
                .map(|(i, url)| PublishRecord::new(format!("repo{}", i), url.join("/")))
                .collect();
            let trie = PathTrie::build(&records).unwrap();
            prop_assert_eq!(trie.len(), records.len());

            let expected = accepted.iter().any(|url| is_segment_prefix(url, &candidate));
            prop_assert_eq!(trie.query(&candidate.join("/")).is_some(), expected);
        }

        /// Property: siblings under a shared parent coexist
        #[test]
        fn siblings_coexist(parent in segments(), a in "[a-z]{1,6}", b in "[a-z]{1,6}") {
            prop_assume!(a != b);
            let left = PublishRecord::new("left", format!("{}/{}", parent.join("/"), a));
            let right = PublishRecord::new("right", format!("{}/{}", parent.join("/"), b));
            let trie = PathTrie::build([&left, &right]).unwrap();
            prop_assert_eq!(trie.len(), 2);
            prop_assert!(trie.query(&parent.join("/")).is_none());
        }
    }
}
