//! Sift Match - tree pattern matching for a compiler middle-end.
//!
//! This crate provides:
//! - The pattern language (`Pattern`, `PatternBuilder`, `PatternNode`):
//!   concrete node shapes plus `Placeholder`, `Wildcard` and `Alternation`
//! - The match engine (`matches`, `matches_with`): decides whether a node
//!   satisfies a pattern and records placeholder captures in `Bindings`
//! - The searcher (`Searcher`, `search`): runs the engine at every node of a
//!   tree and collects accepted node identities into a `MatchSet`
//!
//! # Usage
//!
//! ```text
//! let pattern = /* Call(func=Name(id="f"), args=[?a]) */;
//! for site in search(&tree, &pattern).to_sorted_vec() {
//!     let (_, bindings) = matches(&tree, site, &pattern);
//!     let arg = bindings.lookup(&taxonomy, "a");
//!     // rewrite `site` using `arg`
//! }
//! ```
//!
//! A search does not return bindings; re-run [`matches`] on a result to get
//! a fresh table for that site.

mod bindings;
mod engine;
mod pattern;
mod search;

#[cfg(test)]
mod test_helpers;

pub use bindings::Bindings;
pub use engine::{matches, matches_value, matches_with};
pub use pattern::{Pattern, PatternBuilder, PatternNode, RenderPattern};
pub use search::{search, MatchSet, Searcher};
