//! Sift IR - tree model for the Sift AST matcher.
//!
//! This crate contains the data structures the matcher reads:
//! - `Name` and `StringInterner` for identifiers
//! - `Taxonomy`: the host compiler's node kinds with ordered, shaped fields
//! - `Scalar` and `Value` for field contents
//! - `Tree`: an arena of nodes addressed by `NodeId`
//! - `Visitor` for read-only traversal
//!
//! # Design Philosophy
//!
//! - **Declare kinds once**: every kind lists its fields in a fixed order, so
//!   dispatch is a `KindId` compare and field walks are positional.
//! - **Flatten everything**: children are `NodeId` indices, never `Box`.
//! - **Identity is the index**: structurally equal nodes at different
//!   positions stay distinct.

mod error;
mod interner;
mod kind;
mod name;
mod node_id;
mod render;
mod stack;
mod tree;
mod value;
pub mod visitor;

pub use error::TreeError;
pub use interner::StringInterner;
pub use kind::{FieldDecl, FieldShape, KindDecl, KindId, Taxonomy};
pub use name::Name;
pub use node_id::NodeId;
pub use render::{write_scalar, Render};
pub use stack::ensure_sufficient_stack;
pub use tree::{NodeData, Tree};
pub use value::{Scalar, Value};
pub use visitor::Visitor;
