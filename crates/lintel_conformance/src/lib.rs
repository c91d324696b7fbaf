//! Conformance test helpers for the lintel rule engine.
//!
//! Provides shared functions that run a built syntax tree through the full
//! engine (configuration → rule registry → traversal → diagnostics) and
//! return structured results for assertion in integration tests.

#![warn(missing_docs)]

use lintel_config::{load_config_from_str, LintelConfig};
use lintel_diagnostics::{
    apply_fixes, Diagnostic, DiagnosticRenderer, DiagnosticSink, JsonRenderer,
    TerminalRenderer,
};
use lintel_lint::LintEngine;
use lintel_source::{SourceDb, SourceFile};
use lintel_syntax::{BuiltTree, NodeId, TreeBuilder};
use lintel_types::TypeService;

/// Result of linting one file through the full engine.
pub struct LintOutcome {
    /// The linted buffer.
    pub source: SourceFile,
    /// All diagnostics, in emission order.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any errors were emitted.
    pub has_errors: bool,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl LintOutcome {
    /// Returns the diagnostics reported under `code` (e.g. `"C203"`).
    pub fn with_code(&self, code: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.code.to_string() == code)
            .collect()
    }

    /// Returns the code of every diagnostic, in emission order.
    pub fn codes(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.code.to_string()).collect()
    }

    /// Applies every attached fix the way a host would and returns the
    /// patched text with the number of fixes applied.
    pub fn fixed_source(&self) -> (String, usize) {
        apply_fixes(
            &self.source.content,
            self.diagnostics.iter().filter_map(|d| d.fix.as_ref()),
        )
    }

    /// Renders every diagnostic with the terminal renderer, without color.
    pub fn render_terminal(&self) -> Vec<String> {
        self.render(&TerminalRenderer::new(false))
    }

    /// Renders every diagnostic as a JSON line.
    pub fn render_json(&self) -> Vec<String> {
        self.render(&JsonRenderer)
    }

    fn render(&self, renderer: &dyn DiagnosticRenderer) -> Vec<String> {
        let mut db = SourceDb::new();
        db.add_source(self.source.path.clone(), self.source.content.clone());
        self.diagnostics
            .iter()
            .map(|d| renderer.render(d, &db))
            .collect()
    }
}

/// Builds a program at `path` from the top-level statements `f` returns.
pub fn build(path: &str, f: impl FnOnce(&mut TreeBuilder) -> Vec<NodeId>) -> BuiltTree {
    let mut b = TreeBuilder::new(path);
    let body = f(&mut b);
    let program = b.program(&body);
    b.finish(program)
}

/// Parses a `lintel.toml` document.
pub fn make_config(toml_str: &str) -> LintelConfig {
    load_config_from_str(toml_str).expect("test configuration should parse")
}

/// Creates a configuration with lint deny/allow overrides.
pub fn make_config_with_lint(deny: &[&str], allow: &[&str]) -> LintelConfig {
    let quote = |list: &[&str]| {
        list.iter()
            .map(|s| format!("\"{s}\""))
            .collect::<Vec<_>>()
            .join(", ")
    };
    make_config(&format!(
        "[lint]\ndeny = [{}]\nallow = [{}]\n",
        quote(deny),
        quote(allow)
    ))
}

/// Lints a built file with every built-in rule at its defaults.
pub fn lint(built: &BuiltTree) -> LintOutcome {
    lint_with_config(built, &LintelConfig::default())
}

/// Lints a built file with the given configuration.
pub fn lint_with_config(built: &BuiltTree, config: &LintelConfig) -> LintOutcome {
    lint_with_types(built, config, None)
}

/// Lints a built file with the given configuration and type service.
pub fn lint_with_types(
    built: &BuiltTree,
    config: &LintelConfig,
    types: Option<&dyn TypeService>,
) -> LintOutcome {
    let engine = LintEngine::new(config).expect("test configuration should name known rules");
    let sink = DiagnosticSink::new();
    engine.run(&built.tree, &built.source, types, &sink);

    let totals = sink.totals();
    LintOutcome {
        source: built.source.clone(),
        diagnostics: sink.take_all(),
        has_errors: totals.errors > 0,
        error_count: totals.errors,
        warning_count: totals.warnings,
    }
}
