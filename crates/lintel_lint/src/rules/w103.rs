//! W103: Inline function prop. `onClick={() => ...}` creates a new function on every render.

use lintel_common::LintResult;
use lintel_config::{ConfigError, RuleOptions};
use lintel_diagnostics::{Category, DiagnosticCode, Severity};
use lintel_syntax::{NodeId, NodeTag};

use crate::context::{message_data, RuleContext};
use crate::helpers::{attribute_expression, attribute_name, is_inline_function};
use crate::{LintRule, OptionKind, RuleMeta, RuleOption, RuleSession};

static META: RuleMeta = RuleMeta {
    name: "no-inline-function-props",
    code: DiagnosticCode::new(Category::Warning, 103),
    description: "function literal passed inline as a JSX prop",
    default_severity: Severity::Warning,
    fixable: false,
    messages: &[(
        "inlineFunction",
        "Inline function passed to prop '{{ prop }}' creates a new reference on every render",
    )],
    options: &[RuleOption {
        key: "ignore",
        kind: OptionKind::StringList,
        description: "prop names exempt from the check",
    }],
};

/// Flags JSX attributes whose value is an arrow or function expression.
#[derive(Default)]
pub struct NoInlineFunctionProps {
    ignore: Vec<String>,
}

impl LintRule for NoInlineFunctionProps {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscriptions(&self) -> &'static [NodeTag] {
        &[NodeTag::JsxAttribute]
    }

    fn create(&self) -> Box<dyn RuleSession + '_> {
        Box::new(Session { ignore: &self.ignore })
    }

    fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        options.check_keys(&["ignore"])?;
        if let Some(ignore) = options.string_list("ignore")? {
            self.ignore = ignore;
        }
        Ok(())
    }
}

struct Session<'r> {
    ignore: &'r [String],
}

impl RuleSession for Session<'_> {
    fn visit(&mut self, node: NodeId, cx: &mut RuleContext<'_>) -> LintResult<()> {
        let tree = cx.tree();
        let Some(name) = attribute_name(tree, node) else {
            return Ok(());
        };
        if self.ignore.iter().any(|i| i == name) {
            return Ok(());
        }
        match attribute_expression(tree, node) {
            Some(expr) if is_inline_function(tree, expr) => {
                cx.report(node, "inlineFunction", message_data([("prop", name)]))
            }
            _ => Ok(()),
        }
    }
}
