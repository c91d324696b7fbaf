//! The host-supplied type-resolution interface.

use lintel_syntax::NodeId;
use std::fmt;
use std::ops::BitOr;

/// Opaque handle to a type owned by a [`TypeService`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// Creates a handle from a raw index.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// Flag bits describing a resolved type.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TypeFlags(u32);

impl TypeFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// The `boolean` type.
    pub const BOOLEAN: Self = Self(1 << 0);
    /// `true` or `false` as a literal type.
    pub const BOOLEAN_LITERAL: Self = Self(1 << 1);
    /// `string`.
    pub const STRING: Self = Self(1 << 2);
    /// `number`.
    pub const NUMBER: Self = Self(1 << 3);
    /// `any`.
    pub const ANY: Self = Self(1 << 4);
    /// `unknown`.
    pub const UNKNOWN: Self = Self(1 << 5);
    /// An object or interface type.
    pub const OBJECT: Self = Self(1 << 6);
    /// A union; see [`TypeService::members`].
    pub const UNION: Self = Self(1 << 7);
    /// An intersection; see [`TypeService::members`].
    pub const INTERSECTION: Self = Self(1 << 8);
    /// `null` or `undefined`.
    pub const NULLISH: Self = Self(1 << 9);

    /// Builds flags from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if any bit of `other` is set.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `true` for types the checker could not pin down.
    pub const fn is_opaque(self) -> bool {
        self.intersects(Self(Self::ANY.0 | Self::UNKNOWN.0))
    }
}

impl BitOr for TypeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for TypeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeFlags({:#b})", self.0)
    }
}

/// A failure reported by a [`TypeService`].
///
/// The inference layer never propagates these; they only cause a fallback to
/// the next tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeServiceError {
    /// The handle does not name a type known to the service.
    #[error("unknown type handle {}", .0.as_raw())]
    UnknownType(TypeId),

    /// The service cannot answer right now (checker not ready, program stale).
    #[error("type service unavailable: {0}")]
    Unavailable(String),
}

/// Maps syntax nodes to resolved types and describes those types.
///
/// Implemented by hosts that run a real type checker next to the linter.
pub trait TypeService {
    /// Returns the type of a node, or `None` when the node has no type.
    fn type_of(&self, node: NodeId) -> Result<Option<TypeId>, TypeServiceError>;

    /// Returns the flag bits of a type.
    fn flags(&self, ty: TypeId) -> Result<TypeFlags, TypeServiceError>;

    /// Returns the (possibly qualified) symbol name of a type, if it has one.
    fn symbol_name(&self, ty: TypeId) -> Result<Option<String>, TypeServiceError>;

    /// Returns the members of a union or intersection type.
    fn members(&self, ty: TypeId) -> Result<Vec<TypeId>, TypeServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_queries() {
        let f = TypeFlags::UNION | TypeFlags::NULLISH;
        assert!(f.contains(TypeFlags::UNION));
        assert!(!f.contains(TypeFlags::UNION | TypeFlags::BOOLEAN));
        assert!(f.intersects(TypeFlags::BOOLEAN | TypeFlags::NULLISH));
        assert!(!f.is_opaque());
        assert!(TypeFlags::ANY.is_opaque());
    }

    #[test]
    fn error_display() {
        let err = TypeServiceError::UnknownType(TypeId::from_raw(7));
        assert_eq!(err.to_string(), "unknown type handle 7");
        let err = TypeServiceError::Unavailable("program not built".into());
        assert_eq!(err.to_string(), "type service unavailable: program not built");
    }
}
