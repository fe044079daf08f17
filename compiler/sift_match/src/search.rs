//! Whole-tree search.
//!
//! Visits every node reachable from the start node in pre-order and runs a
//! fresh match attempt at each one. Matching never prunes the walk: the
//! children of a matched node are still visited, so a call nested inside a
//! matching call is reported separately.

use rustc_hash::FxHashSet;
use sift_ir::visitor::walk_node;
use sift_ir::{NodeId, Tree, Visitor};

use crate::{matches_with, Bindings, Pattern};

/// Identities of the nodes a search accepted.
///
/// Keyed by [`NodeId`], so a node reached along several paths is listed once
/// and structurally equal nodes at different positions are listed separately.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MatchSet {
    nodes: FxHashSet<NodeId>,
}

impl MatchSet {
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Members in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Members in arena order, for consumers that need determinism.
    pub fn to_sorted_vec(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.iter().collect();
        nodes.sort_unstable();
        nodes
    }

    fn insert(&mut self, id: NodeId) -> bool {
        self.nodes.insert(id)
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::collections::hash_set::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}

/// Searches trees for one pattern.
pub struct Searcher<'p> {
    pattern: &'p Pattern,
}

impl<'p> Searcher<'p> {
    pub fn new(pattern: &'p Pattern) -> Self {
        Searcher { pattern }
    }

    /// Search the whole tree from its root. A tree without a root has no matches.
    pub fn search(&self, tree: &Tree) -> MatchSet {
        match tree.root() {
            Some(root) => self.search_from(tree, root),
            None => MatchSet::default(),
        }
    }

    /// Search the subtree under `start`, `start` included.
    #[tracing::instrument(level = "debug", skip_all, fields(start = ?start, arena = tree.len()))]
    pub fn search_from(&self, tree: &Tree, start: NodeId) -> MatchSet {
        let mut collector = Collector {
            pattern: self.pattern,
            bindings: Bindings::new(),
            results: MatchSet::default(),
            attempts: 0,
        };
        collector.visit_node(start, tree);
        tracing::debug!(
            attempts = collector.attempts,
            matches = collector.results.len(),
            "search complete"
        );
        collector.results
    }
}

/// Search `tree` from its root for `pattern`.
pub fn search(tree: &Tree, pattern: &Pattern) -> MatchSet {
    Searcher::new(pattern).search(tree)
}

struct Collector<'p> {
    pattern: &'p Pattern,
    /// Reused allocation; cleared before every attempt.
    bindings: Bindings,
    results: MatchSet,
    attempts: usize,
}

impl<'t> Visitor<'t> for Collector<'_> {
    fn visit_node(&mut self, id: NodeId, tree: &'t Tree) {
        self.attempts += 1;
        self.bindings.clear();
        if matches_with(tree, id, self.pattern, &mut self.bindings) {
            self.results.insert(id);
        }
        walk_node(self, id, tree);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests panic on unexpected state")]
mod tests;
