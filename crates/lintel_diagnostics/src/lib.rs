//! Diagnostics reported by lint rules, their fixes, and rendering.
//!
//! A [`Diagnostic`] names the rule that produced it, a message identifier with
//! its substitution data, and the rendered message. Fixes are
//! [`SuggestedFix`]es over the original buffer; [`apply_fixes`] is the host
//! side that patches a buffer with a batch of them. The [`DiagnosticSink`]
//! accumulates diagnostics across rules, and [`DiagnosticRenderer`]
//! implementations format them for terminals or JSON consumers.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod message;
pub mod renderer;
pub mod severity;
pub mod sink;
pub mod suggested_fix;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use message::render_template;
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::{DiagnosticSink, SinkTotals};
pub use suggested_fix::{apply_fixes, Replacement, SuggestedFix};
