//! C205: No JSX in services. Service modules stay free of UI code.

use lintel_common::LintResult;
use lintel_config::{ConfigError, FilePatterns, RuleOptions};
use lintel_diagnostics::{Category, DiagnosticCode, Severity};
use lintel_source::SourceFile;
use lintel_syntax::{NodeId, NodeTag};

use crate::context::{MessageData, RuleContext};
use crate::helpers::is_top_level_jsx;
use crate::{LintRule, OptionKind, RuleMeta, RuleOption, RuleSession};

static META: RuleMeta = RuleMeta {
    name: "no-jsx-in-services",
    code: DiagnosticCode::new(Category::Convention, 205),
    description: "service module contains JSX",
    default_severity: Severity::Warning,
    fixable: false,
    messages: &[(
        "jsxInService",
        "Service modules must not contain JSX; move UI code into a component",
    )],
    options: &[RuleOption {
        key: "files",
        kind: OptionKind::Globs,
        description: "files treated as services (default: **/services/**)",
    }],
};

const SERVICE_FILES: &[&str] = &["**/services/**"];

/// Reports every outermost JSX element or fragment in a service file.
pub struct NoJsxInServices {
    files: FilePatterns,
}

impl Default for NoJsxInServices {
    fn default() -> Self {
        Self {
            files: FilePatterns::defaults(SERVICE_FILES),
        }
    }
}

impl LintRule for NoJsxInServices {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscriptions(&self) -> &'static [NodeTag] {
        &[NodeTag::JsxElement, NodeTag::JsxFragment]
    }

    fn create(&self) -> Box<dyn RuleSession + '_> {
        Box::new(Session)
    }

    fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        options.check_keys(&["files"])?;
        if let Some(files) = options.patterns("files")? {
            self.files = files;
        }
        Ok(())
    }

    fn applies_to(&self, file: &SourceFile) -> bool {
        self.files.matches(&file.normalized_path())
    }
}

struct Session;

impl RuleSession for Session {
    fn visit(&mut self, node: NodeId, cx: &mut RuleContext<'_>) -> LintResult<()> {
        if is_top_level_jsx(cx.tree(), node) {
            cx.report(node, "jsxInService", MessageData::new())?;
        }
        Ok(())
    }
}
