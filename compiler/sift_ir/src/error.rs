//! Errors raised while declaring kinds or building trees and patterns.
//!
//! Matching itself never fails; these only come out of construction and
//! in-place rewriting.

use thiserror::Error;

use crate::{FieldShape, NodeId};

/// Error from taxonomy declaration or node construction.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TreeError {
    /// No kind with this name was declared.
    #[error("unknown node kind `{kind}`")]
    UnknownKind { kind: String },

    /// A kind with this name is already declared.
    #[error("node kind `{kind}` is declared twice")]
    DuplicateKind { kind: String },

    /// A kind declares the same field name twice.
    #[error("field `{field}` is declared twice on `{kind}`")]
    DuplicateField { kind: String, field: String },

    /// A field name that the kind does not declare.
    #[error("`{kind}` has no field `{field}`")]
    UnknownField { kind: String, field: String },

    /// A field the kind declares was not supplied.
    #[error("`{kind}` is missing field `{field}`")]
    MissingField { kind: String, field: String },

    /// Wrong number of field values for the kind.
    #[error("`{kind}` takes {expected} fields, {found} given")]
    ArityMismatch {
        kind: String,
        expected: usize,
        found: usize,
    },

    /// A field value whose shape the kind does not allow there.
    #[error("field `{kind}.{field}` expects {expected}, found {found}")]
    ShapeMismatch {
        kind: String,
        field: String,
        expected: FieldShape,
        found: &'static str,
    },

    /// A node handle that does not belong to this arena.
    #[error("{node:?} is not a node of this tree")]
    UnknownNode { node: NodeId },

    /// A rewrite would make a node reachable from itself.
    #[error("rewriting {node:?} would make it its own descendant")]
    Cycle { node: NodeId },

    /// An alternation without alternatives, which can never match.
    #[error("alternation needs at least one alternative")]
    EmptyAlternation,
}
