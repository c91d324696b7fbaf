//! Lint engine that manages rule registration, configuration, and execution.
//!
//! The `LintEngine` accepts a `LintelConfig` to control which rules are
//! denied, allowed, or warned, then walks one syntax tree per call, driving a
//! fresh session of every enabled rule.

use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use lintel_common::LintResult;
use lintel_config::{ConfigError, LintelConfig};
use lintel_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use lintel_source::SourceFile;
use lintel_syntax::{NodeId, NodeTag, SyntaxTree};
use lintel_types::TypeService;
use tracing::{debug, warn};

use crate::context::RuleContext;
use crate::rules::register_builtin_rules;
use crate::{LintRule, RuleMeta, RuleSession};

/// The lint engine that orchestrates running lint rules on a syntax tree.
///
/// Rules are registered at construction time. The engine respects the
/// configuration to suppress rules (allow), promote rules to errors (deny),
/// or demote them to warnings (warn). Entries match a rule's name or code.
pub struct LintEngine {
    /// All registered lint rules.
    rules: Vec<Box<dyn LintRule>>,
    /// Rules that should be promoted to error severity.
    denied: HashSet<String>,
    /// Rules that should be suppressed (not run).
    allowed: HashSet<String>,
    /// Rules that should be reported as warnings.
    warned: HashSet<String>,
}

/// One enabled rule during one walk.
struct Active<'a> {
    rule: &'a dyn LintRule,
    session: Box<dyn RuleSession + 'a>,
    cx: RuleContext<'a>,
}

impl LintEngine {
    /// Creates a lint engine configured by `config`.
    ///
    /// All builtin rules are registered, then every `[lint]` entry and every
    /// `[rules.<name>]` table is checked against the registry, and each rule
    /// receives its option table.
    pub fn new(config: &LintelConfig) -> Result<Self, ConfigError> {
        let lint = &config.lint;
        let mut engine = Self {
            rules: Vec::new(),
            denied: lint.deny.iter().cloned().collect(),
            allowed: lint.allow.iter().cloned().collect(),
            warned: lint.warn.iter().cloned().collect(),
        };
        register_builtin_rules(&mut engine);

        for entry in lint.deny.iter().chain(&lint.allow).chain(&lint.warn) {
            if engine.rule(entry).is_none() {
                return Err(ConfigError::UnknownRule(entry.clone()));
            }
        }
        for name in config.rules.keys() {
            if !engine.rules.iter().any(|r| r.name() == name) {
                return Err(ConfigError::UnknownRule(name.clone()));
            }
        }
        for rule in &mut engine.rules {
            let options = config.rule_options(rule.name());
            rule.configure(&options)?;
        }
        Ok(engine)
    }

    /// Creates a lint engine with default configuration (no overrides).
    pub fn with_defaults() -> Self {
        let mut engine = Self::empty();
        register_builtin_rules(&mut engine);
        engine
    }

    /// Creates a lint engine with no rules registered.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            denied: HashSet::new(),
            allowed: HashSet::new(),
            warned: HashSet::new(),
        }
    }

    /// Registers a lint rule with the engine.
    pub fn register(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    /// Returns the number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the names of all registered rules.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Looks up a rule by name (`svg-currentcolor`) or code (`C203`).
    pub fn rule(&self, name_or_code: &str) -> Option<&dyn LintRule> {
        self.rules
            .iter()
            .find(|r| r.name() == name_or_code || r.code().to_string() == name_or_code)
            .map(|r| r.as_ref())
    }

    /// Returns the schema of every registered rule.
    pub fn metas(&self) -> Vec<&'static RuleMeta> {
        self.rules.iter().map(|r| r.meta()).collect()
    }

    /// Lints one file and returns its diagnostics.
    ///
    /// Rules run in registration order; each rule's diagnostics keep the
    /// order in which it emitted them. The tree is walked once, in pre-order,
    /// and each node is handed to the sessions that subscribed to its tag.
    pub fn lint(
        &self,
        tree: &SyntaxTree,
        source: &SourceFile,
        types: Option<&dyn TypeService>,
    ) -> Vec<Diagnostic> {
        let mut active: Vec<Active<'_>> = Vec::new();
        for rule in &self.rules {
            let rule = rule.as_ref();
            if self.is_listed(&self.allowed, rule) {
                debug!(rule = rule.name(), "rule allowed; skipping");
                continue;
            }
            if !rule.applies_to(source) {
                debug!(
                    rule = rule.name(),
                    file = %source.path.display(),
                    "rule does not apply to file"
                );
                continue;
            }
            active.push(Active {
                rule,
                session: rule.create(),
                cx: RuleContext::new(tree, source, types, rule),
            });
        }
        debug!(
            file = %source.path.display(),
            rules = active.len(),
            nodes = tree.len(),
            "linting file"
        );

        let mut dispatch: Vec<Vec<usize>> = vec![Vec::new(); NodeTag::COUNT];
        for (index, a) in active.iter().enumerate() {
            for tag in a.rule.subscriptions() {
                let subscribers = &mut dispatch[tag.index()];
                if !subscribers.contains(&index) {
                    subscribers.push(index);
                }
            }
        }

        for node in tree.walk() {
            for &index in &dispatch[tree.tag(node).index()] {
                let Active { rule, session, cx } = &mut active[index];
                guarded(rule.name(), "visit", Some(node), cx, |cx| {
                    session.visit(node, cx)
                });
            }
        }

        let mut out = Vec::new();
        for Active {
            rule,
            mut session,
            mut cx,
        } in active
        {
            guarded(rule.name(), "finish", None, &mut cx, |cx| session.finish(cx));
            let severity = self.severity_for(rule);
            out.extend(cx.into_diagnostics().into_iter().map(|mut diag| {
                if let Some(severity) = severity {
                    diag.severity = severity;
                }
                diag
            }));
        }
        out
    }

    /// Lints one file and emits its diagnostics into `sink`.
    pub fn run(
        &self,
        tree: &SyntaxTree,
        source: &SourceFile,
        types: Option<&dyn TypeService>,
        sink: &DiagnosticSink,
    ) {
        sink.extend(self.lint(tree, source, types));
    }

    fn is_listed(&self, set: &HashSet<String>, rule: &dyn LintRule) -> bool {
        set.contains(rule.name()) || set.contains(&rule.code().to_string())
    }

    /// Returns the configured severity override of a rule, if any.
    fn severity_for(&self, rule: &dyn LintRule) -> Option<Severity> {
        if self.is_listed(&self.denied, rule) {
            Some(Severity::Error)
        } else if self.is_listed(&self.warned, rule) {
            Some(Severity::Warning)
        } else {
            None
        }
    }
}

/// Runs one callback under the failure boundary.
///
/// An `Err` or a panic is logged and the diagnostics the callback buffered
/// are dropped, so the callback is a no-op for that node.
fn guarded<'a>(
    rule: &str,
    callback: &str,
    node: Option<NodeId>,
    cx: &mut RuleContext<'a>,
    f: impl FnOnce(&mut RuleContext<'a>) -> LintResult<()>,
) {
    let mark = cx.pending_len();
    let fault = match panic::catch_unwind(AssertUnwindSafe(|| f(&mut *cx))) {
        Ok(Ok(())) => return,
        Ok(Err(err)) => err.to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };
    cx.discard_since(mark);
    warn!(
        rule,
        callback,
        node = ?node.map(|n| n.as_raw()),
        fault = %fault,
        "rule callback failed; treating it as a no-op"
    );
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic".to_string()
    }
}
