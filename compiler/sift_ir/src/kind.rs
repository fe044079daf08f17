//! Node kind taxonomy.
//!
//! The host compiler declares every node kind once, with an ordered list of
//! named, shaped fields. Trees and patterns are both built against the same
//! [`Taxonomy`], so the matcher dispatches on a [`KindId`] compare and walks
//! fields by position instead of discovering them reflectively.
//!
//! Field order is declaration order. It is also the order in which the
//! matcher visits fields, and therefore decides which occurrence of a
//! repeated placeholder binds first.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{Name, Scalar, StringInterner, TreeError, Value};

/// Index of a declared kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct KindId(u32);

impl KindId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        KindId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which values a field may hold in a concrete tree.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldShape {
    /// A [`Scalar`], compared by value.
    Scalar,
    /// A sub-node, or `None` for an absent optional child.
    Node,
    /// An ordered sequence of sub-nodes and/or scalars.
    Seq,
}

impl FieldShape {
    /// Whether `value` is legal for a field of this shape.
    pub fn admits(self, value: &Value) -> bool {
        match (self, value) {
            (FieldShape::Scalar, Value::Scalar(_))
            | (FieldShape::Node, Value::Node(_) | Value::Scalar(Scalar::None))
            | (FieldShape::Seq, Value::Seq(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldShape::Scalar => "a scalar",
            FieldShape::Node => "a node",
            FieldShape::Seq => "a sequence",
        })
    }
}

/// One declared field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDecl {
    pub name: Name,
    pub shape: FieldShape,
}

/// A declared kind: its name and ordered fields.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KindDecl {
    pub name: Name,
    pub fields: Vec<FieldDecl>,
}

impl KindDecl {
    /// Number of fields.
    #[inline]
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Position of a field by name.
    pub fn field_index(&self, name: Name) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }
}

/// The set of node kinds a tree may contain.
pub struct Taxonomy {
    interner: StringInterner,
    kinds: Vec<KindDecl>,
    by_name: FxHashMap<Name, KindId>,
}

impl Taxonomy {
    /// Create an empty taxonomy.
    pub fn new() -> Self {
        Taxonomy {
            interner: StringInterner::new(),
            kinds: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    /// Declare a kind with its ordered fields.
    ///
    /// ```text
    /// let call = taxonomy.declare("Call", &[
    ///     ("func", FieldShape::Node),
    ///     ("args", FieldShape::Seq),
    /// ])?;
    /// ```
    pub fn declare(
        &mut self,
        kind: &str,
        fields: &[(&str, FieldShape)],
    ) -> Result<KindId, TreeError> {
        let name = self.interner.intern(kind);
        if self.by_name.contains_key(&name) {
            return Err(TreeError::DuplicateKind {
                kind: kind.to_owned(),
            });
        }

        let mut decls: Vec<FieldDecl> = Vec::with_capacity(fields.len());
        for &(field, shape) in fields {
            let field_name = self.interner.intern(field);
            if decls.iter().any(|decl| decl.name == field_name) {
                return Err(TreeError::DuplicateField {
                    kind: kind.to_owned(),
                    field: field.to_owned(),
                });
            }
            decls.push(FieldDecl {
                name: field_name,
                shape,
            });
        }

        let index = u32::try_from(self.kinds.len())
            .unwrap_or_else(|_| panic!("taxonomy exceeded {} kinds", u32::MAX));
        let id = KindId::new(index);
        self.kinds.push(KindDecl {
            name,
            fields: decls,
        });
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Find a kind by name.
    pub fn kind_id(&self, kind: &str) -> Result<KindId, TreeError> {
        self.interner
            .get(kind)
            .and_then(|name| self.by_name.get(&name).copied())
            .ok_or_else(|| TreeError::UnknownKind {
                kind: kind.to_owned(),
            })
    }

    /// The declaration of a kind.
    ///
    /// # Panics
    /// Panics if `kind` was declared by a different taxonomy.
    #[inline]
    pub fn decl(&self, kind: KindId) -> &KindDecl {
        &self.kinds[kind.index()]
    }

    /// Name of a kind.
    pub fn kind_name(&self, kind: KindId) -> &'static str {
        self.interner.lookup(self.decl(kind).name)
    }

    /// Name of the field at `index` on `kind`.
    pub fn field_name(&self, kind: KindId, index: usize) -> &'static str {
        self.interner.lookup(self.decl(kind).fields[index].name)
    }

    /// Position of a field by name.
    pub fn field_index(&self, kind: KindId, field: &str) -> Result<usize, TreeError> {
        self.interner
            .get(field)
            .and_then(|name| self.decl(kind).field_index(name))
            .ok_or_else(|| TreeError::UnknownField {
                kind: self.kind_name(kind).to_owned(),
                field: field.to_owned(),
            })
    }

    /// Number of declared kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Intern an identifier.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// Resolve an interned identifier.
    #[inline]
    pub fn lookup(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Check that `found` values are the right count for `kind`.
    pub fn check_arity(&self, kind: KindId, found: usize) -> Result<(), TreeError> {
        let expected = self.decl(kind).arity();
        if expected == found {
            Ok(())
        } else {
            Err(TreeError::ArityMismatch {
                kind: self.kind_name(kind).to_owned(),
                expected,
                found,
            })
        }
    }

    /// Check that `value` is legal in field `index` of `kind`.
    pub fn check_shape(&self, kind: KindId, index: usize, value: &Value) -> Result<(), TreeError> {
        let shape = self.decl(kind).fields[index].shape;
        if shape.admits(value) {
            Ok(())
        } else {
            Err(TreeError::ShapeMismatch {
                kind: self.kind_name(kind).to_owned(),
                field: self.field_name(kind, index).to_owned(),
                expected: shape,
                found: value.shape_name(),
            })
        }
    }

    /// Arrange named field values into declaration order.
    ///
    /// Every declared field must be given exactly once.
    pub fn order_fields<'a, T>(
        &self,
        kind: KindId,
        named: impl IntoIterator<Item = (&'a str, T)>,
    ) -> Result<Vec<T>, TreeError> {
        let decl = self.decl(kind);
        let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None)
            .take(decl.arity())
            .collect();

        for (field, value) in named {
            let index = self.field_index(kind, field)?;
            if slots[index].replace(value).is_some() {
                return Err(TreeError::DuplicateField {
                    kind: self.kind_name(kind).to_owned(),
                    field: field.to_owned(),
                });
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| TreeError::MissingField {
                    kind: self.kind_name(kind).to_owned(),
                    field: self.field_name(kind, index).to_owned(),
                })
            })
            .collect()
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new()
    }
}
