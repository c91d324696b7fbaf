//! Dense, ID-indexed storage for syntax nodes.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Trait for opaque ID types used as arena keys.
pub trait ArenaId: Copy {
    /// Creates an ID from a raw `u32` index.
    fn from_raw(index: u32) -> Self;

    /// Returns the raw `u32` index.
    fn as_raw(self) -> u32;
}

/// A dense, ID-indexed container.
///
/// Items are only ever appended, so an ID handed out by [`alloc`](Self::alloc)
/// stays valid for the lifetime of the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<I: ArenaId, T> {
    items: Vec<T>,
    #[serde(skip)]
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Allocates a new item and returns its ID.
    pub fn alloc(&mut self, item: T) -> I {
        let id = I::from_raw(self.items.len() as u32);
        self.items.push(item);
        id
    }

    /// Returns the item with the given ID, or `None` if the ID is out of bounds.
    pub fn try_get(&self, id: I) -> Option<&T> {
        self.items.get(id.as_raw() as usize)
    }

    /// Returns `true` if `id` addresses an item in this arena.
    pub fn contains(&self, id: I) -> bool {
        (id.as_raw() as usize) < self.items.len()
    }

    /// Returns the number of items in the arena.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the arena contains no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over `(ID, &T)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }

    /// Iterates over `(ID, &mut T)` pairs in allocation order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (I, &mut T)> {
        self.items
            .iter_mut()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    /// Panics if `id` was not allocated by this arena.
    fn index(&self, id: I) -> &T {
        &self.items[id.as_raw() as usize]
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.as_raw() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::NodeId;

    #[test]
    fn ids_follow_allocation_order() {
        let mut arena: Arena<NodeId, &str> = Arena::new();
        let program = arena.alloc("Program");
        let ident = arena.alloc("Identifier");
        assert_eq!((program.as_raw(), ident.as_raw()), (0, 1));
        assert_eq!(arena[ident], "Identifier");
        let order: Vec<&str> = arena.iter().map(|(_, kind)| *kind).collect();
        assert_eq!(order, vec!["Program", "Identifier"]);
    }

    #[test]
    fn foreign_ids_are_detected() {
        let mut arena: Arena<NodeId, u8> = Arena::default();
        assert!(arena.is_empty());
        arena.alloc(1);
        assert!(arena.contains(NodeId::from_raw(0)));
        assert!(arena.try_get(NodeId::from_raw(1)).is_none());
        assert!(!arena.contains(NodeId::from_raw(7)));
    }

    #[test]
    fn items_can_be_patched_in_place() {
        let mut arena: Arena<NodeId, Option<NodeId>> = Arena::new();
        let parent = arena.alloc(None);
        let child = arena.alloc(None);
        for (_, slot) in arena.iter_mut() {
            *slot = Some(parent);
        }
        arena[parent] = None;
        assert_eq!(arena[child], Some(parent));
        assert_eq!(arena[parent], None);
    }
}
