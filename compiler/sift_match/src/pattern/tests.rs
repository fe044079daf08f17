use pretty_assertions::assert_eq;
use sift_ir::FieldShape;

use super::*;
use crate::test_helpers::Py;

#[test]
fn builder_validates_arity() {
    let py = Py::new();
    let mut b = PatternBuilder::new(&py.taxonomy);
    let any = b.wildcard();

    assert!(matches!(
        b.node(py.call, vec![any]),
        Err(TreeError::ArityMismatch {
            expected: 2,
            found: 1,
            ..
        })
    ));
}

#[test]
fn constructs_may_stand_in_any_field() {
    let py = Py::new();
    let mut b = PatternBuilder::new(&py.taxonomy);

    // a wildcard in a sequence field and a placeholder in a scalar field
    let func = b.placeholder("f");
    let args = b.wildcard();
    assert!(b.node(py.call, vec![func, args]).is_ok());
    let id = b.placeholder("id");
    assert!(b.node(py.name, vec![id]).is_ok());
}

#[test]
fn builder_checks_concrete_shapes() {
    let py = Py::new();
    let mut b = PatternBuilder::new(&py.taxonomy);
    let x = b.node(py.name, vec![b.str("x")]).unwrap();

    // a concrete node where a sequence is declared
    let func = b.wildcard();
    assert!(matches!(
        b.node(py.call, vec![func, x.clone()]),
        Err(TreeError::ShapeMismatch { .. })
    ));
    // a concrete node where a scalar is declared
    assert!(matches!(
        b.node(py.num, vec![x]),
        Err(TreeError::ShapeMismatch { .. })
    ));
}

#[test]
fn builder_rejects_foreign_handles() {
    let py = Py::new();
    let mut b = PatternBuilder::new(&py.taxonomy);
    let stray = Value::Node(NodeId::new(12));

    assert_eq!(
        b.alternation(vec![stray.clone()]),
        Err(TreeError::UnknownNode {
            node: NodeId::new(12)
        })
    );
    assert_eq!(b.alternation(vec![]), Err(TreeError::EmptyAlternation));
    assert!(b.finish(stray).is_err());
}

#[test]
fn node_named_requires_every_field() {
    let py = Py::new();
    let mut b = PatternBuilder::new(&py.taxonomy);
    let func = b.wildcard();

    assert!(matches!(
        b.node_named(py.call, [("func", func.clone())]),
        Err(TreeError::MissingField { .. })
    ));
    assert!(matches!(
        b.node_named(py.call, [("func", func.clone()), ("args", Value::empty_seq()), ("kwargs", Value::NONE)]),
        Err(TreeError::UnknownField { .. })
    ));
    let call = b
        .node_named(py.call, [("args", Value::empty_seq()), ("func", func)])
        .unwrap();
    let pattern = b.finish(call).unwrap();
    assert_eq!(
        pattern.render(&py.taxonomy).to_string(),
        "Call(func=_, args=[])"
    );
}

#[test]
fn render_shows_constructs() {
    let py = Py::new();
    let mut b = PatternBuilder::new(&py.taxonomy);
    let map = b.str("map");
    let filter = b.str("filter");
    let id = b.alternation(vec![map, filter]).unwrap();
    let func = b.node(py.name, vec![id]).unwrap();
    let arg = b.placeholder("a");
    let rest = b.wildcard();
    let root = b.node(py.call, vec![func, Value::Seq(vec![arg, rest])]).unwrap();
    let pattern = b.finish(root).unwrap();

    assert_eq!(
        pattern.render(&py.taxonomy).to_string(),
        r#"Call(func=Name(id=("map" | "filter")), args=[?a, _])"#
    );
    assert_eq!(pattern.len(), 5);
}

#[test]
fn from_tree_copies_shared_children_once() {
    let mut taxonomy = Taxonomy::new();
    let leaf = taxonomy.declare("Leaf", &[("n", FieldShape::Scalar)]).unwrap();
    let pair = taxonomy
        .declare("Pair", &[("l", FieldShape::Node), ("r", FieldShape::Node)])
        .unwrap();

    let mut tree = Tree::new();
    let one = tree.alloc(&taxonomy, leaf, vec![Value::int(1)]).unwrap();
    let both = tree
        .alloc(&taxonomy, pair, vec![Value::Node(one), Value::Node(one)])
        .unwrap();

    let pattern = Pattern::from_tree(&tree, &Value::Node(both));
    assert_eq!(pattern.len(), 2);
    assert_eq!(
        pattern.render(&taxonomy).to_string(),
        tree.render(&taxonomy, &Value::Node(both)).to_string()
    );
    assert!(matches!(pattern.get(NodeId::new(0)), PatternNode::Concrete { kind, .. } if *kind == leaf));
}
