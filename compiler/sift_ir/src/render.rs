//! Human-readable rendering of trees, for logs and test failures.
//!
//! `Call(func=Name(id="f"), args=[Name(id="x")])`

use std::fmt;

use crate::{ensure_sufficient_stack, Scalar, Taxonomy, Tree, Value};

/// Display adapter returned by [`Tree::render`].
pub struct Render<'a> {
    tree: &'a Tree,
    taxonomy: &'a Taxonomy,
    value: &'a Value,
}

impl Tree {
    /// Render a value of this tree.
    pub fn render<'a>(&'a self, taxonomy: &'a Taxonomy, value: &'a Value) -> Render<'a> {
        Render {
            tree: self,
            taxonomy,
            value,
        }
    }
}

impl fmt::Display for Render<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_value(self.value, f)
    }
}

impl Render<'_> {
    fn write_value(&self, value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match value {
            Value::Scalar(scalar) => write_scalar(*scalar, self.taxonomy, f),
            Value::Seq(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    self.write_value(item, f)?;
                }
                f.write_str("]")
            }
            Value::Node(id) => {
                let node = self.tree.get(*id);
                write!(f, "{}(", self.taxonomy.kind_name(node.kind))?;
                for (index, field) in node.fields.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}=", self.taxonomy.field_name(node.kind, index))?;
                    ensure_sufficient_stack(|| self.write_value(field, f))?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Write a scalar the way [`Render`] does.
pub fn write_scalar(scalar: Scalar, taxonomy: &Taxonomy, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match scalar {
        Scalar::None => f.write_str("None"),
        Scalar::Bool(value) => write!(f, "{value}"),
        Scalar::Int(value) => write!(f, "{value}"),
        Scalar::Float(bits) => write!(f, "{:?}", f64::from_bits(bits)),
        Scalar::Str(name) => write!(f, "\"{}\"", taxonomy.lookup(name).escape_debug()),
    }
}
