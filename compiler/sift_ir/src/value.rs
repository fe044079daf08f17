//! Field values: scalars, sub-nodes and sequences.

use crate::{Name, NodeId};

/// A leaf field value, compared by value equality during matching.
///
/// Floats are stored as their bit pattern so `Scalar` is `Eq + Hash`.
/// Float equality is therefore bitwise, not IEEE `==`: `0.0` and `-0.0` are
/// distinct scalars, and a `NaN` equals a `NaN` with the same bits. A pattern
/// `0.0` does not match a tree `-0.0`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Scalar {
    /// Absent optional value.
    None,
    Bool(bool),
    Int(i64),
    /// `f64` bits.
    Float(u64),
    /// Identifier text, operator tag or string literal.
    Str(Name),
}

impl Scalar {
    /// Create a float scalar.
    #[inline]
    pub fn float(value: f64) -> Self {
        Scalar::Float(value.to_bits())
    }

    /// Read back a float scalar.
    #[inline]
    pub fn as_float(self) -> Option<f64> {
        match self {
            Scalar::Float(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }
}

/// The value held by one field of a node.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Scalar(Scalar),
    Node(NodeId),
    Seq(Vec<Value>),
}

impl Value {
    /// The `None` scalar.
    pub const NONE: Value = Value::Scalar(Scalar::None);

    /// Identifier or string scalar.
    #[inline]
    pub fn str(name: Name) -> Self {
        Value::Scalar(Scalar::Str(name))
    }

    /// Integer scalar.
    #[inline]
    pub fn int(value: i64) -> Self {
        Value::Scalar(Scalar::Int(value))
    }

    /// Boolean scalar.
    #[inline]
    pub fn bool(value: bool) -> Self {
        Value::Scalar(Scalar::Bool(value))
    }

    /// Empty sequence.
    #[inline]
    pub fn empty_seq() -> Self {
        Value::Seq(Vec::new())
    }

    /// The node handle, if this is a sub-node.
    #[inline]
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Value::Node(id) => Some(*id),
            _ => None,
        }
    }

    /// The scalar, if this is a scalar.
    #[inline]
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Value::Scalar(scalar) => Some(*scalar),
            _ => None,
        }
    }

    /// The elements, if this is a sequence.
    #[inline]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Short description of the value's shape, for error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Value::Scalar(Scalar::None) => "None",
            Value::Scalar(_) => "a scalar",
            Value::Node(_) => "a node",
            Value::Seq(_) => "a sequence",
        }
    }
}

impl From<NodeId> for Value {
    fn from(id: NodeId) -> Self {
        Value::Node(id)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}
