//! The per-session view a rule gets of the file being linted.

use std::collections::BTreeMap;

use lintel_common::{InternalError, LintResult};
use lintel_diagnostics::{Diagnostic, SuggestedFix};
use lintel_source::{SourceFile, Span};
use lintel_syntax::{NodeId, SyntaxTree};
use lintel_types::{infer_booleanness, infer_ui_nodeness, InferenceCache, TypeService};

use crate::fixer::Fixer;
use crate::LintRule;

/// Substitution data for a message template.
pub type MessageData = BTreeMap<String, String>;

/// Builds [`MessageData`] from key/value pairs.
pub fn message_data<I, K, V>(pairs: I) -> MessageData
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Everything a rule session may read, plus the buffer it reports into.
///
/// One context exists per session. The inference cache lives here, so it is
/// dropped with the session and never shared between rules or files.
pub struct RuleContext<'a> {
    tree: &'a SyntaxTree,
    source: &'a SourceFile,
    types: Option<&'a dyn TypeService>,
    rule: &'a dyn LintRule,
    cache: InferenceCache,
    pending: Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    /// Creates a context for one session of `rule`.
    pub fn new(
        tree: &'a SyntaxTree,
        source: &'a SourceFile,
        types: Option<&'a dyn TypeService>,
        rule: &'a dyn LintRule,
    ) -> Self {
        Self {
            tree,
            source,
            types,
            rule,
            cache: InferenceCache::new(),
            pending: Vec::new(),
        }
    }

    /// Returns the tree being walked.
    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    /// Returns the source buffer the tree's spans index into.
    pub fn source(&self) -> &'a SourceFile {
        self.source
    }

    /// Returns the span of a node.
    pub fn span(&self, node: NodeId) -> Span {
        self.tree.span(node)
    }

    /// Returns the source text of a node (empty if its span does not fit).
    pub fn text(&self, node: NodeId) -> &'a str {
        self.source.text(self.tree.span(node)).unwrap_or_default()
    }

    /// Three-tier boolean inference, memoized for this session.
    pub fn infer_booleanness(&mut self, node: NodeId) -> bool {
        infer_booleanness(self.tree, node, self.types, &mut self.cache)
    }

    /// Three-tier UI-node inference, memoized for this session.
    pub fn infer_ui_nodeness(&mut self, node: NodeId) -> bool {
        infer_ui_nodeness(self.tree, node, self.types, &mut self.cache)
    }

    /// Starts a fix over this file's original text.
    pub fn fixer(&self) -> Fixer<'a> {
        Fixer::new(self.source)
    }

    /// Builds a diagnostic anchored at `node` from one of the rule's messages.
    pub fn diagnostic(
        &self,
        node: NodeId,
        message_id: &str,
        data: MessageData,
    ) -> LintResult<Diagnostic> {
        let meta = self.rule.meta();
        let template = meta
            .messages
            .iter()
            .find(|(id, _)| *id == message_id)
            .map(|(_, template)| *template)
            .ok_or_else(|| {
                InternalError::new(format!(
                    "rule '{}' has no message '{message_id}'",
                    meta.name
                ))
            })?;
        Ok(
            Diagnostic::new(meta.default_severity, meta.code, "", self.tree.span(node))
                .with_rule(meta.name)
                .with_template(message_id, template, data),
        )
    }

    /// Reports a diagnostic without a fix.
    pub fn report(&mut self, node: NodeId, message_id: &str, data: MessageData) -> LintResult<()> {
        let diag = self.diagnostic(node, message_id, data)?;
        self.emit(diag);
        Ok(())
    }

    /// Reports a diagnostic with a fix, if one could be computed.
    pub fn report_with_fix(
        &mut self,
        node: NodeId,
        message_id: &str,
        data: MessageData,
        fix: Option<SuggestedFix>,
    ) -> LintResult<()> {
        let mut diag = self.diagnostic(node, message_id, data)?;
        diag.fix = fix;
        self.emit(diag);
        Ok(())
    }

    /// Appends a finished diagnostic.
    pub fn emit(&mut self, diag: Diagnostic) {
        self.pending.push(diag);
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn discard_since(&mut self, mark: usize) {
        self.pending.truncate(mark);
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.pending
    }
}
