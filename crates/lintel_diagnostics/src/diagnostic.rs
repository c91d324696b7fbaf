//! Structured diagnostics with rule identity, message data, labels, and fixes.

use crate::code::DiagnosticCode;
use crate::label::Label;
use crate::message::render_template;
use crate::severity::Severity;
use crate::suggested_fix::SuggestedFix;
use lintel_source::Span;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A diagnostic reported by a lint rule.
///
/// Besides the rendered `message`, a diagnostic keeps the `message_id` and the
/// substitution `data` it was rendered from, so hosts can re-render or match
/// on them. Once a rule emits a diagnostic it is never modified, except for
/// the severity adjustment the engine applies for `deny`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code of the rule that reported it.
    pub code: DiagnosticCode,
    /// The kebab-case name of the rule that reported it.
    pub rule: String,
    /// The identifier of the message template, unique within the rule.
    pub message_id: String,
    /// Placeholder values substituted into the template.
    pub data: BTreeMap<String, String>,
    /// The rendered message.
    pub message: String,
    /// The span of the anchor node.
    pub primary_span: Span,
    /// Additional annotated source spans providing context.
    pub labels: Vec<Label>,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
    /// Actionable suggestions (e.g., "help: ...").
    pub help: Vec<String>,
    /// An auto-applicable fix, if available.
    pub fix: Option<SuggestedFix>,
}

impl Diagnostic {
    /// Creates a diagnostic with a literal message and no rule identity.
    pub fn new(severity: Severity, code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            severity,
            code,
            rule: String::new(),
            message_id: String::new(),
            data: BTreeMap::new(),
            message: message.into(),
            primary_span: span,
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
            fix: None,
        }
    }

    /// Creates a new error diagnostic with the given code, message, and span.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Error, code, message, span)
    }

    /// Creates a new warning diagnostic with the given code, message, and span.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Warning, code, message, span)
    }

    /// Sets the reporting rule's name.
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = rule.into();
        self
    }

    /// Renders `template` with `data` and records both under `message_id`.
    pub fn with_template(
        mut self,
        message_id: impl Into<String>,
        template: &str,
        data: BTreeMap<String, String>,
    ) -> Self {
        self.message_id = message_id.into();
        self.message = render_template(template, &data);
        self.data = data;
        self
    }

    /// Overrides the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Adds a label to this diagnostic.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// Sets the suggested fix for this diagnostic.
    pub fn with_fix(mut self, fix: SuggestedFix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Returns `true` if a fix is attached.
    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }
}
