//! Structural match engine.
//!
//! Decides whether one concrete value satisfies a pattern, recording
//! placeholder captures in a [`Bindings`] table as it goes.
//!
//! # Algorithm
//!
//! A pattern node is checked in this order:
//! 1. `Placeholder`: bind on first sight; on later sight, re-run the engine
//!    with the earlier capture as the pattern.
//! 2. `Wildcard`: accept.
//! 3. `Alternation`: accept the first alternative that matches.
//! 4. `Concrete`: kinds must be equal, then every field must match in
//!    declaration order.
//!
//! A pattern field is matched by its own shape: a sequence needs a sequence
//! of the same length and matches elementwise, a node recurses, a scalar
//! compares by value.
//!
//! # Bindings are not transactional
//!
//! One table is threaded through every sibling field, sequence element and
//! alternative of an attempt. Captures made before a failure stay in the
//! table, and a conflicting later occurrence fails the attempt without trying
//! other assignments for the earlier one. Only the caller decides when a
//! fresh table starts.

use sift_ir::{ensure_sufficient_stack, KindId, Name, NodeId, Tree, Value};

use crate::{Bindings, Pattern, PatternNode};

/// Match `node` against `pattern` with a fresh binding table.
pub fn matches(tree: &Tree, node: NodeId, pattern: &Pattern) -> (bool, Bindings) {
    let mut bindings = Bindings::new();
    let matched = matches_with(tree, node, pattern, &mut bindings);
    (matched, bindings)
}

/// Match `node` against `pattern`, extending `bindings`.
///
/// `bindings` is updated even when the match fails.
///
/// # Panics
/// Panics if the pattern was built from a different taxonomy than the tree,
/// so that a kind's field count disagrees between the two.
pub fn matches_with(tree: &Tree, node: NodeId, pattern: &Pattern, bindings: &mut Bindings) -> bool {
    matches_value(tree, &Value::Node(node), pattern, bindings)
}

/// Match an arbitrary field value of `tree` against `pattern`.
pub fn matches_value(tree: &Tree, target: &Value, pattern: &Pattern, bindings: &mut Bindings) -> bool {
    Check { tree, bindings }.value(target, pattern, pattern.root())
}

/// A pattern node as the engine sees it.
enum View<'a> {
    Placeholder(Name),
    Wildcard,
    Alternation(&'a [Value]),
    Concrete { kind: KindId, fields: &'a [Value] },
}

/// Where pattern nodes come from.
///
/// A placeholder re-check uses the earlier capture as the pattern, and that
/// capture lives in the tree, so trees are pattern sources too. A tree only
/// ever yields concrete nodes.
trait PatternSource {
    fn view(&self, id: NodeId) -> View<'_>;
}

impl PatternSource for Pattern {
    fn view(&self, id: NodeId) -> View<'_> {
        match self.get(id) {
            PatternNode::Placeholder(name) => View::Placeholder(*name),
            PatternNode::Wildcard => View::Wildcard,
            PatternNode::Alternation(alternatives) => View::Alternation(alternatives),
            PatternNode::Concrete { kind, fields } => View::Concrete {
                kind: *kind,
                fields,
            },
        }
    }
}

impl PatternSource for Tree {
    fn view(&self, id: NodeId) -> View<'_> {
        let node = self.get(id);
        View::Concrete {
            kind: node.kind,
            fields: &node.fields,
        }
    }
}

struct Check<'a> {
    tree: &'a Tree,
    bindings: &'a mut Bindings,
}

impl Check<'_> {
    /// Field match, dispatched on the pattern value's shape.
    fn value<P: PatternSource>(&mut self, target: &Value, source: &P, pattern: &Value) -> bool {
        match pattern {
            Value::Seq(patterns) => match target {
                Value::Seq(targets) if targets.len() == patterns.len() => targets
                    .iter()
                    .zip(patterns)
                    .all(|(target, pattern)| self.value(target, source, pattern)),
                _ => false,
            },
            Value::Node(id) => ensure_sufficient_stack(|| self.node(target, source, *id)),
            Value::Scalar(expected) => matches!(target, Value::Scalar(found) if found == expected),
        }
    }

    fn node<P: PatternSource>(&mut self, target: &Value, source: &P, id: NodeId) -> bool {
        match source.view(id) {
            View::Placeholder(name) => self.placeholder(target, name),
            View::Wildcard => true,
            View::Alternation(alternatives) => alternatives
                .iter()
                .any(|alternative| self.value(target, source, alternative)),
            View::Concrete { kind, fields } => {
                let Value::Node(node) = target else {
                    return false;
                };
                let tree = self.tree;
                let data = tree.get(*node);
                if data.kind != kind {
                    return false;
                }
                assert_eq!(
                    data.fields.len(),
                    fields.len(),
                    "pattern and tree disagree on the fields of {kind:?}; \
                     were they built from the same taxonomy?"
                );
                data.fields
                    .iter()
                    .zip(fields)
                    .all(|(target, pattern)| self.value(target, source, pattern))
            }
        }
    }

    fn placeholder(&mut self, target: &Value, name: Name) -> bool {
        let Some(bound) = self.bindings.get(name).cloned() else {
            tracing::trace!(?name, ?target, "placeholder bound");
            self.bindings.bind(name, target.clone());
            return true;
        };

        let tree = self.tree;
        let consistent = self.value(target, tree, &bound);
        if !consistent {
            tracing::trace!(?name, ?target, ?bound, "placeholder conflicts with earlier capture");
        }
        consistent
    }
}
