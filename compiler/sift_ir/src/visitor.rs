//! Read-only tree traversal.
//!
//! Default implementations call the `walk_*` functions, which descend into
//! every field in declaration order, including each element of a sequence.
//! Override `visit_*` to observe nodes and call `walk_*` to keep descending.
//!
//! ```text
//! struct CountCalls { call: KindId, count: usize }
//!
//! impl<'t> Visitor<'t> for CountCalls {
//!     fn visit_node(&mut self, id: NodeId, tree: &'t Tree) {
//!         if tree.kind(id) == self.call {
//!             self.count += 1;
//!         }
//!         walk_node(self, id, tree);
//!     }
//! }
//! ```

use crate::{ensure_sufficient_stack, NodeId, Tree, Value};

/// Tree visitor. The visitor may mutate its own state; the tree is shared.
pub trait Visitor<'t> {
    /// Visit a node by handle.
    fn visit_node(&mut self, id: NodeId, tree: &'t Tree) {
        walk_node(self, id, tree);
    }

    /// Visit a field value.
    fn visit_value(&mut self, value: &'t Value, tree: &'t Tree) {
        walk_value(self, value, tree);
    }
}

/// Visit every field of `id`.
pub fn walk_node<'t, V: Visitor<'t> + ?Sized>(visitor: &mut V, id: NodeId, tree: &'t Tree) {
    for value in &tree.get(id).fields {
        visitor.visit_value(value, tree);
    }
}

/// Visit the node, or every element, inside `value`.
pub fn walk_value<'t, V: Visitor<'t> + ?Sized>(visitor: &mut V, value: &'t Value, tree: &'t Tree) {
    match value {
        Value::Scalar(_) => {}
        Value::Node(id) => ensure_sufficient_stack(|| visitor.visit_node(*id, tree)),
        Value::Seq(items) => {
            for item in items {
                visitor.visit_value(item, tree);
            }
        }
    }
}
