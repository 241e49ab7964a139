// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Field Mask Domain Model
//!
//! A [`Mask`] is a prefix-closed tree of field names built from dotted path
//! lists such as `fields=a.b,c`. It is the single source of truth for which
//! parts of a response a client asked for.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Implements the mask tree, its builder and its path extractor
//!
//! A mask is built once per inbound request, read while filtering exactly one
//! response, and discarded. It is never mutated after construction.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Separator between the segments of a dotted field path.
pub const PATH_SEPARATOR: &str = ".";

/// Recursive field-selection tree.
///
/// Each node maps a field name to the mask for that field's subtree. A node
/// with no children is a **terminal leaf**: the field and everything beneath
/// it are included in full. A node with children is a **selector**: only the
/// named sub-fields are included.
///
/// The *top-level* mask carries one extra meaning that deeper nodes do not:
/// an empty top-level mask means "no mask was supplied, do not filter". The
/// two cases are handled by distinct code paths in
/// [`crate::application::message_filter`], never by a shared recursive base
/// case.
///
/// # Examples
/// ```
/// use fieldgate_core::Mask;
///
/// let mask = Mask::from_paths(["a.b", "a.b.c", "d"]);
///
/// // "a.b.c" is absorbed by the terminal leaf "a.b".
/// let paths: Vec<String> = mask.paths().into_iter().collect();
/// assert_eq!(paths, vec!["a.b".to_string(), "d".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mask {
    children: HashMap<String, Mask>,
}

impl Mask {
    /// Create an empty mask (top-level meaning: pass everything through).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mask from a list of dotted paths.
    ///
    /// Construction is commutative and idempotent: any permutation of the
    /// input, or the input repeated, yields a structurally identical tree.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mask = Self::new();
        for path in paths {
            mask.insert(path.as_ref());
        }
        mask
    }

    /// Build a mask from raw header values, each holding one or more
    /// comma-separated dotted paths.
    ///
    /// All occurrences are pooled, each path is trimmed of surrounding
    /// whitespace, and the pooled list is normalized (see
    /// [`normalize_paths`]) before the mask is built. No header values at
    /// all yields the empty pass-through mask.
    pub fn from_header_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pooled: Vec<String> = values
            .into_iter()
            .flat_map(|value| {
                value
                    .as_ref()
                    .split(',')
                    .map(|path| path.trim().to_owned())
                    .collect::<Vec<_>>()
            })
            .collect();
        Self::from_paths(normalize_paths(pooled))
    }

    /// Insert a single dotted path.
    ///
    /// Walks the segment chain, creating nodes as needed. Two rules keep
    /// construction order-independent:
    ///
    /// - walking into an existing terminal leaf stops early, because that
    ///   leaf already selects the whole subtree the remaining segments name;
    /// - the final segment of the inserted path clears any children below
    ///   it, because the new terminal supersedes narrower selections.
    ///
    /// Empty segments (from a leading, trailing or doubled separator) are
    /// accepted silently and become empty-string field keys. This leniency
    /// is deliberate and pinned by tests; do not "fix" it without a
    /// compatibility review.
    pub fn insert(&mut self, path: &str) {
        let mut node = self;
        let mut segments = path.split(PATH_SEPARATOR).peekable();
        while let Some(segment) = segments.next() {
            let existed = node.children.contains_key(segment);
            let child = node.children.entry(segment.to_owned()).or_default();
            if existed && child.children.is_empty() && segments.peek().is_some() {
                // An existing terminal leaf already covers the rest of this path.
                return;
            }
            node = child;
        }
        node.children.clear();
    }

    /// True when this node has no children.
    ///
    /// At the top level this means "no mask supplied"; at any deeper level it
    /// means "terminal leaf, include the subtree in full".
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The sub-mask selected for `name`, if any.
    pub fn child(&self, name: &str) -> Option<&Mask> {
        self.children.get(name)
    }

    /// Iterate over the (field name, sub-mask) pairs of this node.
    ///
    /// Iteration order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Mask)> {
        self.children.iter().map(|(name, child)| (name.as_str(), child))
    }

    /// Flatten the mask back into the set of terminal dotted paths it
    /// represents.
    ///
    /// Only leaf paths are returned; intermediate selector paths are not.
    /// For any mask `m`, `Mask::from_paths(m.paths())` rebuilds a
    /// structurally identical tree.
    pub fn paths(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let mut prefix = Vec::new();
        self.collect_paths(&mut prefix, &mut out);
        out
    }

    fn collect_paths(&self, prefix: &mut Vec<String>, out: &mut BTreeSet<String>) {
        for (name, child) in &self.children {
            prefix.push(name.clone());
            if child.children.is_empty() {
                out.insert(prefix.join(PATH_SEPARATOR));
            }
            child.collect_paths(prefix, out);
            prefix.pop();
        }
    }
}

impl fmt::Display for Mask {
    /// Renders the terminal paths comma-joined, for log lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for path in self.paths() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{path}")?;
            first = false;
        }
        Ok(())
    }
}

/// Normalize a path list before mask construction.
///
/// Removes exact duplicates and any path covered by an ancestor that is also
/// present (`"a.b"` is redundant when `"a"` is in the list). Each path is
/// trimmed of surrounding whitespace first. Relative order of the surviving
/// paths is preserved, though nothing downstream depends on it.
pub fn normalize_paths<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let trimmed: Vec<String> = paths
        .into_iter()
        .map(|path| path.as_ref().trim().to_owned())
        .collect();
    let mut out = Vec::new();
    for (index, path) in trimmed.iter().enumerate() {
        let duplicate = trimmed[..index].contains(path);
        let covered = trimmed.iter().enumerate().any(|(other_index, ancestor)| {
            other_index != index
                && path.starts_with(ancestor.as_str())
                && path[ancestor.len()..].starts_with(PATH_SEPARATOR)
        });
        if !duplicate && !covered {
            out.push(path.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_builds_pass_through_mask() {
        let mask = Mask::from_paths(Vec::<String>::new());
        assert!(mask.is_empty());
        assert!(mask.paths().is_empty());
    }

    #[test]
    fn redundant_descendant_is_absorbed() {
        // "a.b.c" is covered by the terminal leaf "a.b".
        let mask = Mask::from_paths(["a.b", "a.b.c", "d.e", "f"]);
        let expected = Mask::from_paths(["a.b", "d.e", "f"]);
        assert_eq!(mask, expected);
    }

    #[test]
    fn ancestor_inserted_later_truncates_descendants() {
        let mask = Mask::from_paths(["a.b.c", "a.b"]);
        let expected = Mask::from_paths(["a.b"]);
        assert_eq!(mask, expected);
    }

    #[test]
    fn construction_is_order_independent() {
        let paths = ["a.b", "a.b.c", "d.e", "f", "a"];
        let permutations: [Vec<&str>; 4] = [
            vec!["a.b", "a.b.c", "d.e", "f", "a"],
            vec!["a", "f", "d.e", "a.b.c", "a.b"],
            vec!["a.b.c", "a", "a.b", "f", "d.e"],
            vec!["d.e", "a.b", "a", "a.b.c", "f"],
        ];
        let reference = Mask::from_paths(paths);
        for permutation in permutations {
            assert_eq!(Mask::from_paths(permutation), reference);
        }
    }

    #[test]
    fn construction_is_idempotent() {
        let paths = ["a.b", "d.e", "f"];
        let doubled: Vec<&str> = paths.iter().chain(paths.iter()).copied().collect();
        assert_eq!(Mask::from_paths(doubled), Mask::from_paths(paths));
    }

    #[test]
    fn paths_returns_terminal_paths_only() {
        let mask = Mask::from_paths(["a.b.c", "a.d", "e"]);
        let paths: Vec<String> = mask.paths().into_iter().collect();
        assert_eq!(paths, vec!["a.b.c", "a.d", "e"]);
    }

    #[test]
    fn paths_round_trips_through_builder() {
        let mask = Mask::from_paths(["x.y", "x.y.z", "w", "w.v"]);
        let rebuilt = Mask::from_paths(mask.paths());
        assert_eq!(rebuilt.paths(), mask.paths());
        assert_eq!(rebuilt, mask);
    }

    #[test]
    fn build_matches_normalized_input() {
        let input = ["a.b", "a.b.c", "d.e", "f", "d.e"];
        let mask = Mask::from_paths(input);
        let normalized = normalize_paths(input);
        assert_eq!(
            mask.paths(),
            normalized.iter().cloned().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn normalize_drops_duplicates_and_covered_paths() {
        let normalized = normalize_paths([" a ", "a.b", "c.d", "c.d", "e"]);
        assert_eq!(normalized, vec!["a", "c.d", "e"]);
    }

    #[test]
    fn normalize_keeps_sibling_prefixes_distinct() {
        // "ab" is not an ancestor of "abc": coverage requires a separator.
        let normalized = normalize_paths(["ab", "abc"]);
        assert_eq!(normalized, vec!["ab", "abc"]);
    }

    #[test]
    fn empty_segments_become_keys() {
        // Documented leniency: stray separators produce empty-string keys
        // rather than an error.
        let mask = Mask::from_paths(["a..b"]);
        let a = mask.child("a").unwrap();
        let hole = a.child("").unwrap();
        assert!(hole.child("b").unwrap().is_empty());

        let trailing = Mask::from_paths([""]);
        assert!(!trailing.is_empty());
        assert!(trailing.child("").unwrap().is_empty());
    }

    #[test]
    fn header_values_are_pooled_split_and_normalized() {
        let mask = Mask::from_header_values(["a.b, a.b.c", "d.e", "f ,d.e"]);
        assert_eq!(mask, Mask::from_paths(["a.b", "d.e", "f"]));
    }

    #[test]
    fn display_renders_sorted_terminal_paths() {
        let mask = Mask::from_paths(["d", "a.b"]);
        assert_eq!(mask.to_string(), "a.b,d");
    }
}
