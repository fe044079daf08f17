use pretty_assertions::assert_eq;
use sift_ir::Value;

use super::*;
use crate::test_helpers::Py;
use crate::{matches, PatternBuilder};

/// `Call(func=Name(id=<func>), args=[?a])`
fn unary_call(py: &Py, func: &str) -> Pattern {
    let mut b = PatternBuilder::new(&py.taxonomy);
    let func = b.node(py.name, vec![b.str(func)]).unwrap();
    let arg = b.placeholder("a");
    let root = b.node(py.call, vec![func, Value::Seq(vec![arg])]).unwrap();
    b.finish(root).unwrap()
}

#[test]
fn finds_each_call_and_rematch_recovers_bindings() {
    let py = Py::new();
    let mut tree = Tree::new();
    let x = py.name(&mut tree, "x");
    let y = py.name(&mut tree, "y");
    let fx = py.call(&mut tree, "f", vec![x]);
    let fy = py.call(&mut tree, "f", vec![y]);
    py.module(&mut tree, vec![fx, fy]);

    let pattern = unary_call(&py, "f");
    let found = search(&tree, &pattern);
    assert_eq!(found.to_sorted_vec(), vec![fx, fy]);

    let (matched, bindings) = matches(&tree, fx, &pattern);
    assert!(matched);
    assert_eq!(bindings.lookup(&py.taxonomy, "a"), Some(&Value::Node(x)));
    let (matched, bindings) = matches(&tree, fy, &pattern);
    assert!(matched);
    assert_eq!(bindings.lookup(&py.taxonomy, "a"), Some(&Value::Node(y)));
}

#[test]
fn alternation_selects_calls_by_name() {
    let py = Py::new();
    let mut tree = Tree::new();
    let f = py.name(&mut tree, "f");
    let xs = py.name(&mut tree, "xs");
    let map = py.call(&mut tree, "map", vec![f, xs]);
    let g = py.name(&mut tree, "g");
    let filter = py.call(&mut tree, "filter", vec![g, xs]);
    let z = py.name(&mut tree, "z");
    let other = py.call(&mut tree, "other", vec![z]);
    py.module(&mut tree, vec![map, filter, other]);

    // Call(func=Name(id=("map" | "filter")), args=_)
    let mut b = PatternBuilder::new(&py.taxonomy);
    let names = vec![b.str("map"), b.str("filter")];
    let id = b.alternation(names).unwrap();
    let func = b.node(py.name, vec![id]).unwrap();
    let args = b.wildcard();
    let root = b.node(py.call, vec![func, args]).unwrap();
    let pattern = b.finish(root).unwrap();

    let found = search(&tree, &pattern);
    assert_eq!(found.len(), 2);
    assert!(found.contains(map));
    assert!(found.contains(filter));
    assert!(!found.contains(other));
}

#[test]
fn nested_matches_are_reported_separately() {
    let py = Py::new();
    let mut tree = Tree::new();
    let x = py.name(&mut tree, "x");
    let inner = py.call(&mut tree, "f", vec![x]);
    let outer = py.call(&mut tree, "f", vec![inner]);
    py.module(&mut tree, vec![outer]);

    let found = search(&tree, &unary_call(&py, "f"));
    assert_eq!(found.to_sorted_vec(), vec![inner, outer]);
}

#[test]
fn equal_structure_at_different_positions_is_kept_apart() {
    let py = Py::new();
    let mut tree = Tree::new();
    let x1 = py.name(&mut tree, "x");
    let first = py.call(&mut tree, "f", vec![x1]);
    let x2 = py.name(&mut tree, "x");
    let second = py.call(&mut tree, "f", vec![x2]);
    py.module(&mut tree, vec![first, second]);

    let found = search(&tree, &unary_call(&py, "f"));
    assert_eq!(found.len(), 2);
}

#[test]
fn shared_node_is_counted_once() {
    let py = Py::new();
    let mut tree = Tree::new();
    let x = py.name(&mut tree, "x");
    let shared = py.call(&mut tree, "f", vec![x]);
    // the same call reachable from two statements and as both operands
    let sum = py.bin_op(&mut tree, shared, "+", shared);
    py.module(&mut tree, vec![shared, sum]);

    let pattern = unary_call(&py, "f");
    let found = search(&tree, &pattern);
    assert_eq!(found.to_sorted_vec(), vec![shared]);
}

#[test]
fn search_is_repeatable() {
    let py = Py::new();
    let mut tree = Tree::new();
    let a = py.name(&mut tree, "a");
    let b = py.name(&mut tree, "b");
    let fa = py.call(&mut tree, "f", vec![a]);
    let fb = py.call(&mut tree, "f", vec![b]);
    let sum = py.bin_op(&mut tree, fa, "-", fb);
    let outer = py.call(&mut tree, "f", vec![sum]);
    py.module(&mut tree, vec![outer]);

    let pattern = unary_call(&py, "f");
    let searcher = Searcher::new(&pattern);
    let first = searcher.search(&tree);
    let second = searcher.search(&tree);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn search_from_limits_to_subtree() {
    let py = Py::new();
    let mut tree = Tree::new();
    let x = py.name(&mut tree, "x");
    let inner = py.call(&mut tree, "f", vec![x]);
    let wrapped = py.call(&mut tree, "g", vec![inner]);
    let y = py.name(&mut tree, "y");
    let elsewhere = py.call(&mut tree, "f", vec![y]);
    py.module(&mut tree, vec![wrapped, elsewhere]);

    let pattern = unary_call(&py, "f");
    let found = Searcher::new(&pattern).search_from(&tree, wrapped);
    assert_eq!(found.to_sorted_vec(), vec![inner]);
    assert_eq!((&found).into_iter().count(), 1);
}

#[test]
fn empty_results_are_not_errors() {
    let py = Py::new();
    let pattern = unary_call(&py, "f");

    let mut tree = Tree::new();
    assert!(search(&tree, &pattern).is_empty());

    let n = py.num(&mut tree, 3);
    py.module(&mut tree, vec![n]);
    assert!(search(&tree, &pattern).is_empty());
}

#[test]
fn every_node_is_visited() {
    let py = Py::new();
    let mut tree = Tree::new();
    let x = py.name(&mut tree, "x");
    let one = py.num(&mut tree, 1);
    let sum = py.bin_op(&mut tree, x, "+", one);
    let call = py.call(&mut tree, "print", vec![sum]);
    py.module(&mut tree, vec![call]);

    let mut b = PatternBuilder::new(&py.taxonomy);
    let root = b.wildcard();
    let anything = b.finish(root).unwrap();

    // every allocated node is reachable from the module
    let found = search(&tree, &anything);
    assert_eq!(found.to_sorted_vec(), tree.node_ids().collect::<Vec<_>>());
}
