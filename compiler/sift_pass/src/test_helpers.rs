//! Arithmetic taxonomy shared by the pass tests.

#![allow(clippy::unwrap_used)]

use sift_ir::{FieldShape, KindId, NodeId, Taxonomy, Tree, Value};

pub struct Arith {
    pub taxonomy: Taxonomy,
    pub module: KindId,
    pub name: KindId,
    pub num: KindId,
    pub bin_op: KindId,
}

impl Arith {
    pub fn new() -> Self {
        let mut taxonomy = Taxonomy::new();
        let module = taxonomy.declare("Module", &[("body", FieldShape::Seq)]).unwrap();
        let name = taxonomy.declare("Name", &[("id", FieldShape::Scalar)]).unwrap();
        let num = taxonomy.declare("Num", &[("n", FieldShape::Scalar)]).unwrap();
        let bin_op = taxonomy
            .declare(
                "BinOp",
                &[
                    ("left", FieldShape::Node),
                    ("op", FieldShape::Scalar),
                    ("right", FieldShape::Node),
                ],
            )
            .unwrap();
        Arith {
            taxonomy,
            module,
            name,
            num,
            bin_op,
        }
    }

    pub fn s(&self, text: &str) -> Value {
        Value::str(self.taxonomy.intern(text))
    }

    pub fn name(&self, tree: &mut Tree, id: &str) -> NodeId {
        tree.alloc(&self.taxonomy, self.name, vec![self.s(id)]).unwrap()
    }

    pub fn num(&self, tree: &mut Tree, n: i64) -> NodeId {
        tree.alloc(&self.taxonomy, self.num, vec![Value::int(n)]).unwrap()
    }

    pub fn bin_op(&self, tree: &mut Tree, left: NodeId, op: &str, right: NodeId) -> NodeId {
        tree.alloc(
            &self.taxonomy,
            self.bin_op,
            vec![Value::Node(left), self.s(op), Value::Node(right)],
        )
        .unwrap()
    }

    /// Make a module of `exprs` the root.
    pub fn module(&self, tree: &mut Tree, exprs: Vec<NodeId>) -> NodeId {
        let body = exprs.into_iter().map(Value::Node).collect();
        let module = tree
            .alloc(&self.taxonomy, self.module, vec![Value::Seq(body)])
            .unwrap();
        tree.set_root(module).unwrap();
        module
    }

    pub fn render(&self, tree: &Tree, id: NodeId) -> String {
        tree.render(&self.taxonomy, &Value::Node(id)).to_string()
    }
}
