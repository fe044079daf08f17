//! A small Python-like taxonomy for unit tests.

#![allow(clippy::unwrap_used)]

use sift_ir::{FieldShape, KindId, NodeId, Taxonomy, Tree, Value};

/// `Module(body)`, `Expr(value)`, `Call(func, args)`, `Name(id)`,
/// `BinOp(left, op, right)`, `Num(n)`.
pub struct Py {
    pub taxonomy: Taxonomy,
    pub module: KindId,
    pub expr: KindId,
    pub call: KindId,
    pub name: KindId,
    pub bin_op: KindId,
    pub num: KindId,
}

impl Py {
    pub fn new() -> Self {
        let mut taxonomy = Taxonomy::new();
        let module = taxonomy.declare("Module", &[("body", FieldShape::Seq)]).unwrap();
        let expr = taxonomy.declare("Expr", &[("value", FieldShape::Node)]).unwrap();
        let call = taxonomy
            .declare("Call", &[("func", FieldShape::Node), ("args", FieldShape::Seq)])
            .unwrap();
        let name = taxonomy.declare("Name", &[("id", FieldShape::Scalar)]).unwrap();
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
        let num = taxonomy.declare("Num", &[("n", FieldShape::Scalar)]).unwrap();
        Py {
            taxonomy,
            module,
            expr,
            call,
            name,
            bin_op,
            num,
        }
    }

    /// Interned string scalar.
    pub fn s(&self, text: &str) -> Value {
        Value::str(self.taxonomy.intern(text))
    }

    pub fn name(&self, tree: &mut Tree, id: &str) -> NodeId {
        tree.alloc(&self.taxonomy, self.name, vec![self.s(id)]).unwrap()
    }

    pub fn num(&self, tree: &mut Tree, n: i64) -> NodeId {
        tree.alloc(&self.taxonomy, self.num, vec![Value::int(n)]).unwrap()
    }

    /// `func(args...)` where `func` is a plain name.
    pub fn call(&self, tree: &mut Tree, func: &str, args: Vec<NodeId>) -> NodeId {
        let func = self.name(tree, func);
        let args = args.into_iter().map(Value::Node).collect();
        tree.alloc(&self.taxonomy, self.call, vec![Value::Node(func), Value::Seq(args)])
            .unwrap()
    }

    pub fn bin_op(&self, tree: &mut Tree, left: NodeId, op: &str, right: NodeId) -> NodeId {
        tree.alloc(
            &self.taxonomy,
            self.bin_op,
            vec![Value::Node(left), self.s(op), Value::Node(right)],
        )
        .unwrap()
    }

    /// Wrap each expression in a statement and make the module the root.
    pub fn module(&self, tree: &mut Tree, exprs: Vec<NodeId>) -> NodeId {
        let body = exprs
            .into_iter()
            .map(|value| {
                Value::Node(
                    tree.alloc(&self.taxonomy, self.expr, vec![Value::Node(value)])
                        .unwrap(),
                )
            })
            .collect();
        let module = tree
            .alloc(&self.taxonomy, self.module, vec![Value::Seq(body)])
            .unwrap();
        tree.set_root(module).unwrap();
        module
    }
}
