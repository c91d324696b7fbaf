//! An in-memory [`TypeService`].
//!
//! Hosts without a live checker can record what they know up front (for
//! instance from a type-annotated cache) and hand the table to the linter.

use crate::service::{TypeFlags, TypeId, TypeService, TypeServiceError};
use lintel_syntax::NodeId;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
struct TypeEntry {
    flags: TypeFlags,
    name: Option<String>,
    members: Vec<TypeId>,
}

/// A table of types and node bindings.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    types: Vec<TypeEntry>,
    bindings: FxHashMap<NodeId, TypeId>,
}

impl TypeTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type with the given flags and optional symbol name.
    pub fn add(&mut self, flags: TypeFlags, name: Option<&str>) -> TypeId {
        let id = TypeId::from_raw(self.types.len() as u32);
        self.types.push(TypeEntry {
            flags,
            name: name.map(str::to_string),
            members: Vec::new(),
        });
        id
    }

    /// Adds a named object type (`ReactNode`, `JSX.Element`, ...).
    pub fn named(&mut self, name: &str) -> TypeId {
        self.add(TypeFlags::OBJECT, Some(name))
    }

    /// Adds the `boolean` type.
    pub fn boolean(&mut self) -> TypeId {
        self.add(TypeFlags::BOOLEAN, Some("boolean"))
    }

    /// Adds a union of `members`.
    pub fn union(&mut self, members: &[TypeId]) -> TypeId {
        let id = self.add(TypeFlags::UNION, None);
        self.types[id.as_raw() as usize].members = members.to_vec();
        id
    }

    /// Adds an intersection of `members`.
    pub fn intersection(&mut self, members: &[TypeId]) -> TypeId {
        let id = self.add(TypeFlags::INTERSECTION, None);
        self.types[id.as_raw() as usize].members = members.to_vec();
        id
    }

    /// Replaces the member list of an existing union or intersection.
    ///
    /// Allows building self-referential types.
    pub fn set_members(&mut self, ty: TypeId, members: &[TypeId]) -> Result<(), TypeServiceError> {
        let entry = self
            .types
            .get_mut(ty.as_raw() as usize)
            .ok_or(TypeServiceError::UnknownType(ty))?;
        entry.members = members.to_vec();
        Ok(())
    }

    /// Records the type of a node.
    pub fn bind(&mut self, node: NodeId, ty: TypeId) {
        self.bindings.insert(node, ty);
    }

    /// Returns the number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types were added.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn entry(&self, ty: TypeId) -> Result<&TypeEntry, TypeServiceError> {
        self.types
            .get(ty.as_raw() as usize)
            .ok_or(TypeServiceError::UnknownType(ty))
    }
}

impl TypeService for TypeTable {
    fn type_of(&self, node: NodeId) -> Result<Option<TypeId>, TypeServiceError> {
        Ok(self.bindings.get(&node).copied())
    }

    fn flags(&self, ty: TypeId) -> Result<TypeFlags, TypeServiceError> {
        Ok(self.entry(ty)?.flags)
    }

    fn symbol_name(&self, ty: TypeId) -> Result<Option<String>, TypeServiceError> {
        Ok(self.entry(ty)?.name.clone())
    }

    fn members(&self, ty: TypeId) -> Result<Vec<TypeId>, TypeServiceError> {
        Ok(self.entry(ty)?.members.clone())
    }
}
