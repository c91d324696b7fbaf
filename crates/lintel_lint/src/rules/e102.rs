//! E102: UI node prop rendered as a component. `<Icon />` where `Icon` is a
//! prop holding an already-rendered element.

use lintel_common::LintResult;
use lintel_diagnostics::{Category, DiagnosticCode, Label, Severity};
use lintel_syntax::{NodeId, NodeKind, NodeTag};

use crate::context::{message_data, RuleContext};
use crate::helpers::{enclosing_function, jsx_name, param_binding};
use crate::{LintRule, RuleMeta, RuleSession};

static META: RuleMeta = RuleMeta {
    name: "ui-node-prop-as-component",
    code: DiagnosticCode::new(Category::Error, 102),
    description: "prop typed as a UI node is rendered as a component",
    default_severity: Severity::Error,
    fixable: false,
    messages: &[(
        "uiNodeAsComponent",
        "Prop '{{ prop }}' holds a rendered UI node, not a component; embed it as an expression instead of rendering <{{ prop }} />",
    )],
    options: &[],
};

/// Flags `<Prop />` inside a function whose parameter `Prop` is typed as a
/// UI node (`ReactNode`, `ReactElement`, `React.ReactNode`, `JSX.Element`).
///
/// The parameter may be a plain identifier or a destructured property; the
/// type comes from the checker when available, else from the annotation.
pub struct UiNodePropAsComponent;

impl LintRule for UiNodePropAsComponent {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscriptions(&self) -> &'static [NodeTag] {
        &[NodeTag::JsxOpeningElement]
    }

    fn create(&self) -> Box<dyn RuleSession + '_> {
        Box::new(Session)
    }
}

struct Session;

impl RuleSession for Session {
    fn visit(&mut self, node: NodeId, cx: &mut RuleContext<'_>) -> LintResult<()> {
        let tree = cx.tree();
        let NodeKind::JsxOpeningElement { name, .. } = tree.kind(node) else {
            return Ok(());
        };
        // Member tags (`<Icons.Check />`) never name a parameter.
        if !matches!(tree.kind(*name), NodeKind::JsxIdentifier { .. }) {
            return Ok(());
        }
        let Some(tag) = jsx_name(tree, *name) else {
            return Ok(());
        };
        if !tag.starts_with(|c: char| c.is_ascii_uppercase()) {
            return Ok(());
        }

        let mut scope = node;
        while let Some(func) = enclosing_function(tree, scope) {
            if let Some(binding) = param_binding(tree, func, &tag) {
                if cx.infer_ui_nodeness(binding) {
                    let diag = cx
                        .diagnostic(node, "uiNodeAsComponent", message_data([("prop", tag)]))?
                        .with_label(Label::related(cx.span(binding), "declared as a UI node here"));
                    cx.emit(diag);
                }
                break;
            }
            scope = func;
        }
        Ok(())
    }
}
