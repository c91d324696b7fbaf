//! Best-effort type inference for lint rules.
//!
//! A host may hand the linter a [`TypeService`] backed by a real checker. When
//! it does not, or when the service cannot answer for a node, inference falls
//! back to the syntactic annotation on the node and finally to a conservative
//! `false`. Results are memoized per traversal session in an
//! [`InferenceCache`].

#![warn(missing_docs)]

pub mod cache;
pub mod infer;
pub mod service;
pub mod table;

pub use cache::{InferenceCache, InferenceKind};
pub use infer::{
    annotation_of, infer_booleanness, infer_ui_nodeness, is_ui_node_type_name, Inference,
};
pub use service::{TypeFlags, TypeId, TypeService, TypeServiceError};
pub use table::TypeTable;
