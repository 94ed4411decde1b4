//! Dotted table-path helpers.
//!
//! A table path is the dotted name of a document table (`"A.B.C"`). The tree
//! of nodes is reconstructed from these names alone, so everything here is a
//! pure function over `&str`.

use serde::Deserialize;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// How descendant names are matched against an ancestor name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescendantMatch {
    /// `"A.B"` descends from `"A"`, `"AB"` does not.
    #[default]
    Segment,
    /// Raw string prefix: both `"A.B"` and `"AB"` descend from `"A"`.
    Prefix,
}

/// Depth of a path in the tree: the number of separators.
pub fn rank(path: &str) -> usize {
    path.matches(SEPARATOR).count()
}

/// Split a path on its last separator.
///
/// Returns `(head, tail)`; `head` is empty for single-segment paths.
///
/// ```
/// use taxon_core::path::split_tail;
///
/// assert_eq!(split_tail("A.B.c"), ("A.B", "c"));
/// assert_eq!(split_tail("top"), ("", "top"));
/// ```
pub fn split_tail(path: &str) -> (&str, &str) {
    match path.rfind(SEPARATOR) {
        Some(idx) => (&path[..idx], &path[idx + SEPARATOR.len_utf8()..]),
        None => ("", path),
    }
}

/// Proper prefixes of a path, longest first.
///
/// ```
/// use taxon_core::path::ancestors;
///
/// let found: Vec<_> = ancestors("C.B.C").collect();
/// assert_eq!(found, ["C.B", "C"]);
/// ```
pub fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.rmatch_indices(SEPARATOR).map(move |(idx, _)| &path[..idx])
}

/// Check whether `name` descends from `ancestor` under the given matching mode.
///
/// A name never descends from itself.
pub fn is_descendant(name: &str, ancestor: &str, mode: DescendantMatch) -> bool {
    if name == ancestor || !name.starts_with(ancestor) {
        return false;
    }
    match mode {
        DescendantMatch::Prefix => true,
        DescendantMatch::Segment => name[ancestor.len()..].starts_with(SEPARATOR),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_rank() {
        assert_eq!(rank("A"), 0);
        assert_eq!(rank("A.B"), 1);
        assert_eq!(rank("A.B.C"), 2);
    }

    #[test]
    fn test_split_tail_nested() {
        assert_eq!(split_tail("A.B"), ("A", "B"));
    }

    #[test]
    fn test_ancestors_root_is_empty() {
        assert_eq!(ancestors("A").count(), 0);
    }

    #[test]
    fn test_ancestors_longest_first() {
        let found: Vec<_> = ancestors("A.B.C.D").collect();
        assert_eq!(found, ["A.B.C", "A.B", "A"]);
    }

    #[test]
    fn test_is_descendant_segment() {
        let mode = DescendantMatch::Segment;
        assert!(is_descendant("A.B", "A", mode));
        assert!(is_descendant("A.B.C", "A", mode));
        assert!(!is_descendant("AB", "A", mode));
        assert!(!is_descendant("A", "A", mode));
        assert!(!is_descendant("B.A", "A", mode));
    }

    #[test]
    fn test_is_descendant_prefix() {
        let mode = DescendantMatch::Prefix;
        assert!(is_descendant("A.B", "A", mode));
        assert!(is_descendant("AB", "A", mode));
        assert!(!is_descendant("A", "A", mode));
    }

    fn dotted_path() -> impl Strategy<Value = String> {
        prop::collection::vec("[A-Za-z_][A-Za-z0-9_]{0,5}", 1..6).prop_map(|segments| segments.join("."))
    }

    proptest! {
        #[test]
        fn ancestors_are_proper_prefixes(path in dotted_path()) {
            let found: Vec<_> = ancestors(&path).collect();
            prop_assert_eq!(found.len(), rank(&path));
            for (depth, ancestor) in found.iter().rev().enumerate() {
                prop_assert_eq!(rank(ancestor), depth);
                prop_assert!(is_descendant(&path, ancestor, DescendantMatch::Segment));
            }
        }

        #[test]
        fn split_tail_rejoins(path in dotted_path()) {
            let (head, tail) = split_tail(&path);
            prop_assert!(!tail.contains(SEPARATOR));
            if head.is_empty() {
                prop_assert_eq!(tail, path.as_str());
            } else {
                prop_assert_eq!(format!("{head}.{tail}"), path);
            }
        }
    }
}
