//! Placeholder binding table.

use rustc_hash::FxHashMap;
use sift_ir::{Name, NodeId, Taxonomy, Value};

/// Placeholder name -> captured value, for one top-level match attempt.
///
/// A placeholder captures whatever its field holds: a node, a scalar or a
/// whole sequence. The first capture of a name is authoritative; later
/// occurrences are checked against it and never replace it. Entries iterate
/// in the order they were bound.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bindings {
    entries: Vec<(Name, Value)>,
    index: FxHashMap<Name, usize>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value bound to `name`.
    pub fn get(&self, name: Name) -> Option<&Value> {
        self.index.get(&name).map(|&slot| &self.entries[slot].1)
    }

    /// The node bound to `name`, if it captured a node.
    pub fn get_node(&self, name: Name) -> Option<NodeId> {
        self.get(name).and_then(Value::as_node)
    }

    /// Look a binding up by placeholder text.
    pub fn lookup(&self, taxonomy: &Taxonomy, name: &str) -> Option<&Value> {
        taxonomy.interner().get(name).and_then(|name| self.get(name))
    }

    #[inline]
    pub fn contains(&self, name: Name) -> bool {
        self.index.contains_key(&name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bindings in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = (Name, &Value)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    /// Drop every binding.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Record the first capture of `name`.
    pub(crate) fn bind(&mut self, name: Name, value: Value) {
        debug_assert!(!self.contains(name), "placeholder bound twice");
        self.index.insert(name, self.entries.len());
        self.entries.push((name, value));
    }
}
