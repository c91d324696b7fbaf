//! Shared foundational types used across the lintel rule crates.
//!
//! This crate provides the internal-fault result type threaded through every
//! rule callback and the identifier case helpers shared by naming rules.

#![warn(missing_docs)]

pub mod case;
pub mod result;

pub use case::{is_pascal_case, split_words, to_pascal_case};
pub use result::{InternalError, LintResult};
