//! Lint rules and the engine that runs them over a syntax tree.
//!
//! Each rule is a small state machine over one traversal of one file: the
//! engine asks it for a fresh [`RuleSession`], feeds it every node whose
//! [`NodeTag`] it subscribed to in pre-order, then calls
//! [`RuleSession::finish`] so checks that need the whole file can run.
//!
//! # Rule Categories
//!
//! - **E-series (errors):** props rendered the wrong way for what they hold
//! - **W-series (warnings):** nested ternaries, inline object/function props, empty catches
//! - **C-series (conventions):** one component per file, boolean naming, icon hygiene, service purity

#![warn(missing_docs)]

mod context;
mod engine;
mod fixer;
pub mod helpers;
mod rules;

pub use context::{message_data, MessageData, RuleContext};
pub use engine::LintEngine;
pub use fixer::Fixer;
pub use rules::register_builtin_rules;
pub use rules::{
    BooleanNaming, JsxElementComponentMismatch, MemoizedExport, NoEmptyCatch,
    NoInlineFunctionProps, NoInlineObjectProps, NoJsxInServices, NoNestedTernary,
    OneComponentPerFile, SvgCurrentColor, UiNodePropAsComponent,
};

use lintel_common::LintResult;
use lintel_config::{ConfigError, RuleOptions};
use lintel_diagnostics::{DiagnosticCode, Severity};
use lintel_source::SourceFile;
use lintel_syntax::{NodeId, NodeTag};

/// The value shape a rule option accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    /// An array of strings.
    StringList,
    /// An array of glob patterns matched against the file path.
    Globs,
}

/// One accepted key of a rule's `[rules.<name>]` table.
#[derive(Clone, Copy, Debug)]
pub struct RuleOption {
    /// The option key.
    pub key: &'static str,
    /// The accepted value shape.
    pub kind: OptionKind,
    /// What the option controls.
    pub description: &'static str,
}

/// The declarative schema of a rule, as exposed to hosts.
#[derive(Clone, Debug)]
pub struct RuleMeta {
    /// Kebab-case rule name.
    pub name: &'static str,
    /// Rule code.
    pub code: DiagnosticCode,
    /// One-line description.
    pub description: &'static str,
    /// Severity before `deny`/`warn` adjustment.
    pub default_severity: Severity,
    /// Whether the rule attaches fixes.
    pub fixable: bool,
    /// Message identifiers and their `{{placeholder}}` templates.
    pub messages: &'static [(&'static str, &'static str)],
    /// Accepted options.
    pub options: &'static [RuleOption],
}

/// A lint rule: a schema plus a factory for per-file sessions.
pub trait LintRule: Send + Sync {
    /// Returns the schema of this rule.
    fn meta(&self) -> &'static RuleMeta;

    /// Returns the node kinds this rule's sessions want to visit.
    fn subscriptions(&self) -> &'static [NodeTag];

    /// Starts a traversal session for one file.
    fn create(&self) -> Box<dyn RuleSession + '_>;

    /// Applies the rule's `[rules.<name>]` table.
    ///
    /// The default accepts exactly the keys listed in the schema and ignores
    /// their values.
    fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        let known: Vec<&str> = self.meta().options.iter().map(|o| o.key).collect();
        options.check_keys(&known)
    }

    /// Returns `false` if the rule should not run on `file` at all.
    fn applies_to(&self, _file: &SourceFile) -> bool {
        true
    }

    /// Returns the kebab-case name of this rule (e.g. "no-nested-ternary").
    fn name(&self) -> &'static str {
        self.meta().name
    }

    /// Returns the code of this rule (e.g. W101).
    fn code(&self) -> DiagnosticCode {
        self.meta().code
    }

    /// Returns the severity reported unless configuration overrides it.
    fn default_severity(&self) -> Severity {
        self.meta().default_severity
    }
}

/// The state one rule accumulates over one walk of one file.
///
/// A session never outlives the walk that created it; nothing it holds is
/// shared with other files or other rules.
pub trait RuleSession {
    /// Called for each subscribed node, in pre-order.
    fn visit(&mut self, node: NodeId, cx: &mut RuleContext<'_>) -> LintResult<()>;

    /// Called once after the last node.
    fn finish(&mut self, _cx: &mut RuleContext<'_>) -> LintResult<()> {
        Ok(())
    }
}
