//! Syntax tree model consumed by the lintel rules.
//!
//! Trees are produced by a host parser and handed to the linter already built.
//! Nodes live in an [`Arena`] and are addressed by [`NodeId`]; the arena index
//! is the node's identity for the lifetime of the tree. Ownership runs
//! parent → children only: the parent link stored on each [`Node`] is a plain
//! index, never an owner.
//!
//! [`TreeBuilder`] synthesizes a tree together with its exact source text, so
//! hosts embedding pre-parsed trees (and tests) get spans that index into a
//! real buffer.

#![warn(missing_docs)]

pub mod arena;
pub mod builder;
pub mod ids;
pub mod node;
pub mod tree;

pub use arena::{Arena, ArenaId};
pub use builder::{BuiltTree, Part, TreeBuilder};
pub use ids::NodeId;
pub use node::{Function, Literal, LiteralValue, Node, NodeKind, NodeTag, TsKeyword, VarKind};
pub use tree::{Ancestors, PreOrder, SyntaxTree};
