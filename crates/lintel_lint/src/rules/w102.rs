//! W102: Inline object prop. `prop={{ ... }}` creates a new object on every render.

use lintel_common::LintResult;
use lintel_config::{ConfigError, RuleOptions};
use lintel_diagnostics::{Category, DiagnosticCode, Severity};
use lintel_syntax::{NodeId, NodeTag};

use crate::context::{message_data, RuleContext};
use crate::helpers::{attribute_expression, attribute_name, is_inline_object};
use crate::{LintRule, OptionKind, RuleMeta, RuleOption, RuleSession};

static META: RuleMeta = RuleMeta {
    name: "no-inline-object-props",
    code: DiagnosticCode::new(Category::Warning, 102),
    description: "object literal passed inline as a JSX prop",
    default_severity: Severity::Warning,
    fixable: false,
    messages: &[(
        "inlineObject",
        "Inline object passed to prop '{{ prop }}' creates a new reference on every render",
    )],
    options: &[RuleOption {
        key: "ignore",
        kind: OptionKind::StringList,
        description: "prop names exempt from the check (default: style)",
    }],
};

/// Flags JSX attributes whose value is an object literal written in place.
pub struct NoInlineObjectProps {
    ignore: Vec<String>,
}

impl Default for NoInlineObjectProps {
    fn default() -> Self {
        Self {
            ignore: vec!["style".to_string()],
        }
    }
}

impl LintRule for NoInlineObjectProps {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscriptions(&self) -> &'static [NodeTag] {
        &[NodeTag::JsxAttribute]
    }

    fn create(&self) -> Box<dyn RuleSession + '_> {
        Box::new(Session { rule: self })
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
    rule: &'r NoInlineObjectProps,
}

impl RuleSession for Session<'_> {
    fn visit(&mut self, node: NodeId, cx: &mut RuleContext<'_>) -> LintResult<()> {
        let tree = cx.tree();
        let Some(name) = attribute_name(tree, node) else {
            return Ok(());
        };
        if self.rule.ignore.iter().any(|i| i == name) {
            return Ok(());
        }
        if attribute_expression(tree, node).is_some_and(|e| is_inline_object(tree, e)) {
            cx.report(node, "inlineObject", message_data([("prop", name)]))?;
        }
        Ok(())
    }
}
