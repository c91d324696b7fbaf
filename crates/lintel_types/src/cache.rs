//! Session-scoped memoization of inference results.

use lintel_syntax::NodeId;
use rustc_hash::FxHashMap;

/// Which fact an inference entry answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InferenceKind {
    /// Is the node boolean-typed?
    Boolean,
    /// Is the node typed as a renderable UI node?
    UiNode,
}

/// Inference results keyed by `(NodeId, InferenceKind)`.
///
/// One cache belongs to one traversal session and is dropped with it. Entries
/// are append-only: the first result recorded for a key is the one every
/// later lookup sees.
#[derive(Debug, Default)]
pub struct InferenceCache {
    entries: FxHashMap<(NodeId, InferenceKind), bool>,
}

impl InferenceCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized result, if any.
    pub fn get(&self, node: NodeId, kind: InferenceKind) -> Option<bool> {
        self.entries.get(&(node, kind)).copied()
    }

    /// Records a result unless one is already present; returns the stored value.
    pub fn insert(&mut self, node: NodeId, kind: InferenceKind, value: bool) -> bool {
        *self.entries.entry((node, kind)).or_insert(value)
    }

    /// Returns the number of memoized results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been memoized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_write_wins() {
        let mut cache = InferenceCache::new();
        let n = NodeId::from_raw(1);
        assert_eq!(cache.get(n, InferenceKind::Boolean), None);
        assert!(cache.insert(n, InferenceKind::Boolean, true));
        assert!(cache.insert(n, InferenceKind::Boolean, false));
        assert_eq!(cache.get(n, InferenceKind::Boolean), Some(true));
    }

    #[test]
    fn kinds_are_separate_keys() {
        let mut cache = InferenceCache::new();
        let n = NodeId::from_raw(1);
        cache.insert(n, InferenceKind::Boolean, true);
        assert_eq!(cache.get(n, InferenceKind::UiNode), None);
        cache.insert(n, InferenceKind::UiNode, false);
        assert_eq!(cache.len(), 2);
    }
}
