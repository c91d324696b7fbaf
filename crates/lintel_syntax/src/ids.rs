//! Opaque node identifiers.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};

/// Stable identity of a node within one [`SyntaxTree`](crate::SyntaxTree).
///
/// A thin `u32` index into the tree's arena. Caches keyed by `NodeId` are
/// valid exactly as long as the tree they were computed against.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates an ID from a raw `u32` index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

impl ArenaId for NodeId {
    fn from_raw(index: u32) -> Self {
        Self(index)
    }

    fn as_raw(self) -> u32 {
        self.0
    }
}
