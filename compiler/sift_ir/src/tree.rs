//! Arena-allocated program trees.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. The
//! index is the node's identity, which is what lets a search report two
//! structurally equal occurrences as distinct results.
//!
//! Construction validates every node against the [`Taxonomy`]: the field
//! count must equal the kind's arity, each value must have the declared
//! shape, and child handles must already exist in the arena. A tree built
//! only through [`Tree::alloc`] is therefore acyclic; [`Tree::replace`] and
//! [`Tree::set_field`] keep it that way by rejecting rewrites that would make
//! a node its own descendant. Sharing a child between several parents is
//! allowed.

use rustc_hash::FxHashSet;

use crate::{KindId, NodeId, Taxonomy, TreeError, Value};

/// One concrete node: its kind and its field values in declaration order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeData {
    pub kind: KindId,
    pub fields: Vec<Value>,
}

/// A program tree.
#[derive(Clone, Debug, Default)]
pub struct Tree {
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Tree {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Create an empty tree with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    /// Allocate a node from field values in declaration order.
    pub fn alloc(
        &mut self,
        taxonomy: &Taxonomy,
        kind: KindId,
        fields: Vec<Value>,
    ) -> Result<NodeId, TreeError> {
        self.validate(taxonomy, kind, &fields)?;
        let index = u32::try_from(self.nodes.len())
            .ok()
            .filter(|&index| index != u32::MAX)
            .unwrap_or_else(|| panic!("tree exceeded {} nodes", u32::MAX - 1));
        self.nodes.push(NodeData { kind, fields });
        Ok(NodeId::new(index))
    }

    /// Allocate a node from `(field, value)` pairs in any order.
    pub fn alloc_named<'a>(
        &mut self,
        taxonomy: &Taxonomy,
        kind: KindId,
        fields: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Result<NodeId, TreeError> {
        let fields = taxonomy.order_fields(kind, fields)?;
        self.alloc(taxonomy, kind, fields)
    }

    /// Mark `id` as the root searched by default.
    pub fn set_root(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.ensure_contains(id)?;
        self.root = Some(id);
        Ok(())
    }

    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Get a node.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    #[inline]
    pub fn get(&self, id: NodeId) -> &NodeData {
        match self.nodes.get(id.index()) {
            Some(node) => node,
            None => panic!("{id:?} is not a node of this tree ({} nodes)", self.nodes.len()),
        }
    }

    #[inline]
    pub fn try_get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Kind of a node.
    #[inline]
    pub fn kind(&self, id: NodeId) -> KindId {
        self.get(id).kind
    }

    /// Read a field by name.
    pub fn field(&self, taxonomy: &Taxonomy, id: NodeId, field: &str) -> Result<&Value, TreeError> {
        let node = self.try_get(id).ok_or(TreeError::UnknownNode { node: id })?;
        let index = taxonomy.field_index(node.kind, field)?;
        Ok(&node.fields[index])
    }

    /// Replace a node's kind and fields in place, keeping its identity.
    pub fn replace(
        &mut self,
        taxonomy: &Taxonomy,
        id: NodeId,
        kind: KindId,
        fields: Vec<Value>,
    ) -> Result<(), TreeError> {
        self.ensure_contains(id)?;
        self.validate(taxonomy, kind, &fields)?;
        if fields.iter().any(|value| self.reaches(value, id)) {
            return Err(TreeError::Cycle { node: id });
        }
        self.nodes[id.index()] = NodeData { kind, fields };
        Ok(())
    }

    /// Overwrite one field, returning the previous value.
    pub fn set_field(
        &mut self,
        taxonomy: &Taxonomy,
        id: NodeId,
        field: &str,
        value: Value,
    ) -> Result<Value, TreeError> {
        let kind = self.try_get(id).ok_or(TreeError::UnknownNode { node: id })?.kind;
        let index = taxonomy.field_index(kind, field)?;
        taxonomy.check_shape(kind, index, &value)?;
        self.check_handles(&value)?;
        if self.reaches(&value, id) {
            return Err(TreeError::Cycle { node: id });
        }
        Ok(std::mem::replace(&mut self.nodes[id.index()].fields[index], value))
    }

    /// Number of nodes in the arena, reachable or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node handle in allocation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        // alloc keeps the arena below u32::MAX nodes
        (0..self.nodes.len()).map(|index| u32::try_from(index).map_or(NodeId::INVALID, NodeId::new))
    }

    fn ensure_contains(&self, id: NodeId) -> Result<(), TreeError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(TreeError::UnknownNode { node: id })
        }
    }

    fn validate(&self, taxonomy: &Taxonomy, kind: KindId, fields: &[Value]) -> Result<(), TreeError> {
        taxonomy.check_arity(kind, fields.len())?;
        for (index, value) in fields.iter().enumerate() {
            taxonomy.check_shape(kind, index, value)?;
            self.check_handles(value)?;
        }
        Ok(())
    }

    fn check_handles(&self, value: &Value) -> Result<(), TreeError> {
        match value {
            Value::Scalar(_) => Ok(()),
            Value::Node(id) => self.ensure_contains(*id),
            Value::Seq(items) => items.iter().try_for_each(|item| self.check_handles(item)),
        }
    }

    /// Whether `target` is `value` itself or one of its descendants.
    fn reaches(&self, value: &Value, target: NodeId) -> bool {
        let mut seen = FxHashSet::default();
        let mut work: Vec<&Value> = vec![value];
        while let Some(value) = work.pop() {
            match value {
                Value::Scalar(_) => {}
                Value::Seq(items) => work.extend(items),
                Value::Node(id) => {
                    if *id == target {
                        return true;
                    }
                    if seen.insert(*id) {
                        work.extend(&self.get(*id).fields);
                    }
                }
            }
        }
        false
    }
}
