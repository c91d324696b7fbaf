//! W101: Nested ternary. A conditional expression with another conditional
//! as one of its branches.

use lintel_common::LintResult;
use lintel_diagnostics::{Category, DiagnosticCode, Severity};
use lintel_syntax::{NodeId, NodeKind, NodeTag, SyntaxTree};

use crate::context::{MessageData, RuleContext};
use crate::helpers::skip_parens;
use crate::{LintRule, RuleMeta, RuleSession};

static META: RuleMeta = RuleMeta {
    name: "no-nested-ternary",
    code: DiagnosticCode::new(Category::Warning, 101),
    description: "ternary expression nested inside another ternary",
    default_severity: Severity::Warning,
    fixable: false,
    messages: &[(
        "nestedTernary",
        "Do not nest ternary expressions; extract the inner condition into a variable or an early return",
    )],
    options: &[],
};

/// Flags a conditional whose consequent or alternate is itself a conditional.
///
/// Only the outermost conditional of a chain is reported, so
/// `a ? 1 : b ? 2 : c ? 3 : 4` yields one diagnostic.
pub struct NoNestedTernary;

impl LintRule for NoNestedTernary {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscriptions(&self) -> &'static [NodeTag] {
        &[NodeTag::ConditionalExpression]
    }

    fn create(&self) -> Box<dyn RuleSession + '_> {
        Box::new(Session)
    }
}

struct Session;

impl RuleSession for Session {
    fn visit(&mut self, node: NodeId, cx: &mut RuleContext<'_>) -> LintResult<()> {
        let tree = cx.tree();
        let NodeKind::ConditionalExpression {
            consequent,
            alternate,
            ..
        } = tree.kind(node)
        else {
            return Ok(());
        };
        if is_branch_of_conditional(tree, node) {
            return Ok(());
        }
        let nested = [*consequent, *alternate].into_iter().any(|branch| {
            matches!(
                tree.kind(skip_parens(tree, branch)),
                NodeKind::ConditionalExpression { .. }
            )
        });
        if nested {
            cx.report(node, "nestedTernary", MessageData::new())?;
        }
        Ok(())
    }
}

/// Returns `true` if `node` (through parentheses) is the consequent or
/// alternate of a parent conditional.
fn is_branch_of_conditional(tree: &SyntaxTree, node: NodeId) -> bool {
    let mut child = node;
    while let Some(parent) = tree.parent(child) {
        match tree.kind(parent) {
            NodeKind::ParenthesizedExpression { .. } => child = parent,
            NodeKind::ConditionalExpression {
                consequent,
                alternate,
                ..
            } => return *consequent == child || *alternate == child,
            _ => return false,
        }
    }
    false
}
