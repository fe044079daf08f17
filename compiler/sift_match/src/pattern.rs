//! Pattern language.
//!
//! A [`Pattern`] is a small arena shaped like a [`Tree`], built from the same
//! [`Taxonomy`] as the trees it will be matched against. Any field position,
//! at any depth and inside sequences, may hold one of three pattern-only
//! constructs instead of a concrete value:
//!
//! - `Placeholder(name)`: captures the value found there. Later occurrences
//!   of the same name must match a structurally equal value.
//! - `Wildcard`: accepts any value, captures nothing.
//! - `Alternation(alternatives)`: accepts a value matching any alternative,
//!   tried in order.
//!
//! ```text
//! // Call(func=Name(id=("map" | "filter")), args=_)
//! let mut b = PatternBuilder::new(&taxonomy);
//! let id = b.alternation(vec![b.str("map"), b.str("filter")])?;
//! let func = b.node(name, vec![id])?;
//! let args = b.wildcard();
//! let root = b.node(call, vec![func, args])?;
//! let pattern = b.finish(root)?;
//! ```

use std::fmt;

use rustc_hash::FxHashMap;
use sift_ir::{
    ensure_sufficient_stack, write_scalar, KindId, Name, NodeId, Taxonomy, Tree, TreeError, Value,
};

/// One node of a pattern arena.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PatternNode {
    /// Named capture.
    Placeholder(Name),
    /// Matches anything, binds nothing.
    Wildcard,
    /// Matches if any alternative matches, first success wins.
    Alternation(Vec<Value>),
    /// A concrete node shape whose fields are themselves patterns.
    Concrete { kind: KindId, fields: Vec<Value> },
}

/// An immutable pattern, reused across a whole search.
///
/// `Value::Node` handles inside a pattern index its own arena, not a tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pattern {
    nodes: Vec<PatternNode>,
    root: Value,
}

impl Pattern {
    /// The top-level pattern value.
    #[inline]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Get a pattern node.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this pattern.
    #[inline]
    pub fn get(&self, id: NodeId) -> &PatternNode {
        &self.nodes[id.index()]
    }

    /// Number of pattern nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Lift a concrete tree value into a pattern with no placeholders.
    ///
    /// The result matches `value` itself, and every value structurally equal
    /// to it, with no bindings.
    pub fn from_tree(tree: &Tree, value: &Value) -> Pattern {
        let mut lift = Lift {
            tree,
            nodes: Vec::new(),
            copied: FxHashMap::default(),
        };
        let root = lift.value(value);
        Pattern {
            nodes: lift.nodes,
            root,
        }
    }

    /// Render for logs: `Call(func=?f, args=[_, ("a" | "b")])`.
    pub fn render<'a>(&'a self, taxonomy: &'a Taxonomy) -> RenderPattern<'a> {
        RenderPattern {
            pattern: self,
            taxonomy,
        }
    }
}

/// Incremental pattern construction, validated against a taxonomy.
pub struct PatternBuilder<'t> {
    taxonomy: &'t Taxonomy,
    nodes: Vec<PatternNode>,
}

impl<'t> PatternBuilder<'t> {
    pub fn new(taxonomy: &'t Taxonomy) -> Self {
        PatternBuilder {
            taxonomy,
            nodes: Vec::new(),
        }
    }

    /// A concrete node shape, fields in declaration order.
    ///
    /// Every declared field must be supplied. Fields given as concrete values
    /// must have the declared shape; pattern constructs may stand anywhere.
    pub fn node(&mut self, kind: KindId, fields: Vec<Value>) -> Result<Value, TreeError> {
        self.taxonomy.check_arity(kind, fields.len())?;
        for (index, value) in fields.iter().enumerate() {
            self.check_handles(value)?;
            if !self.is_construct(value) {
                self.taxonomy.check_shape(kind, index, value)?;
            }
        }
        Ok(self.push(PatternNode::Concrete { kind, fields }))
    }

    /// A concrete node shape from `(field, value)` pairs in any order.
    pub fn node_named<'a>(
        &mut self,
        kind: KindId,
        fields: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Result<Value, TreeError> {
        let fields = self.taxonomy.order_fields(kind, fields)?;
        self.node(kind, fields)
    }

    /// A named capture.
    pub fn placeholder(&mut self, name: &str) -> Value {
        let name = self.taxonomy.intern(name);
        self.push(PatternNode::Placeholder(name))
    }

    /// Accept anything.
    pub fn wildcard(&mut self) -> Value {
        self.push(PatternNode::Wildcard)
    }

    /// Accept any of `alternatives`, tried in order.
    pub fn alternation(&mut self, alternatives: Vec<Value>) -> Result<Value, TreeError> {
        if alternatives.is_empty() {
            return Err(TreeError::EmptyAlternation);
        }
        for alternative in &alternatives {
            self.check_handles(alternative)?;
        }
        Ok(self.push(PatternNode::Alternation(alternatives)))
    }

    /// An interned string scalar, for identifiers and operator tags.
    pub fn str(&self, text: &str) -> Value {
        Value::str(self.taxonomy.intern(text))
    }

    /// Finish with `root` as the top-level pattern.
    pub fn finish(self, root: Value) -> Result<Pattern, TreeError> {
        self.check_handles(&root)?;
        Ok(Pattern {
            nodes: self.nodes,
            root,
        })
    }

    fn push(&mut self, node: PatternNode) -> Value {
        let index = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("pattern exceeded {} nodes", u32::MAX));
        self.nodes.push(node);
        Value::Node(NodeId::new(index))
    }

    fn is_construct(&self, value: &Value) -> bool {
        match value {
            Value::Node(id) => !matches!(self.nodes[id.index()], PatternNode::Concrete { .. }),
            _ => false,
        }
    }

    fn check_handles(&self, value: &Value) -> Result<(), TreeError> {
        match value {
            Value::Scalar(_) => Ok(()),
            Value::Node(id) if id.index() < self.nodes.len() => Ok(()),
            Value::Node(id) => Err(TreeError::UnknownNode { node: *id }),
            Value::Seq(items) => items.iter().try_for_each(|item| self.check_handles(item)),
        }
    }
}

struct Lift<'a> {
    tree: &'a Tree,
    nodes: Vec<PatternNode>,
    /// Tree node -> pattern node, so shared children are copied once.
    copied: FxHashMap<NodeId, NodeId>,
}

impl Lift<'_> {
    fn value(&mut self, value: &Value) -> Value {
        match value {
            Value::Scalar(scalar) => Value::Scalar(*scalar),
            Value::Seq(items) => Value::Seq(items.iter().map(|item| self.value(item)).collect()),
            Value::Node(id) => Value::Node(ensure_sufficient_stack(|| self.node(*id))),
        }
    }

    fn node(&mut self, id: NodeId) -> NodeId {
        if let Some(&copied) = self.copied.get(&id) {
            return copied;
        }
        let tree = self.tree;
        let source = tree.get(id);
        let fields = source.fields.iter().map(|field| self.value(field)).collect();
        let index = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("pattern exceeded {} nodes", u32::MAX));
        let lifted = NodeId::new(index);
        self.nodes.push(PatternNode::Concrete {
            kind: source.kind,
            fields,
        });
        self.copied.insert(id, lifted);
        lifted
    }
}

/// Display adapter returned by [`Pattern::render`].
pub struct RenderPattern<'a> {
    pattern: &'a Pattern,
    taxonomy: &'a Taxonomy,
}

impl fmt::Display for RenderPattern<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_value(&self.pattern.root, f)
    }
}

impl RenderPattern<'_> {
    fn write_value(&self, value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match value {
            Value::Scalar(scalar) => write_scalar(*scalar, self.taxonomy, f),
            Value::Seq(items) => {
                f.write_str("[")?;
                self.write_list(items, ", ", f)?;
                f.write_str("]")
            }
            Value::Node(id) => match self.pattern.get(*id) {
                PatternNode::Placeholder(name) => write!(f, "?{}", self.taxonomy.lookup(*name)),
                PatternNode::Wildcard => f.write_str("_"),
                PatternNode::Alternation(alternatives) => {
                    f.write_str("(")?;
                    self.write_list(alternatives, " | ", f)?;
                    f.write_str(")")
                }
                PatternNode::Concrete { kind, fields } => {
                    write!(f, "{}(", self.taxonomy.kind_name(*kind))?;
                    for (index, field) in fields.iter().enumerate() {
                        if index > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}=", self.taxonomy.field_name(*kind, index))?;
                        ensure_sufficient_stack(|| self.write_value(field, f))?;
                    }
                    f.write_str(")")
                }
            },
        }
    }

    fn write_list(&self, items: &[Value], separator: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                f.write_str(separator)?;
            }
            self.write_value(item, f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests panic on unexpected state")]
mod tests;
