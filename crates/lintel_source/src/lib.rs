//! Source buffers, byte spans, and line/column resolution for diagnostics.
//!
//! This crate provides the [`SourceDb`] owning every linted buffer, [`FileId`]
//! and [`Span`] for addressing byte ranges in the original text, and
//! [`ResolvedSpan`] for turning offsets into 1-indexed line/column pairs.

#![warn(missing_docs)]

pub mod file_id;
pub mod resolved_span;
pub mod source_db;
pub mod source_file;
pub mod span;

pub use file_id::FileId;
pub use resolved_span::ResolvedSpan;
pub use source_db::SourceDb;
pub use source_file::SourceFile;
pub use span::Span;
