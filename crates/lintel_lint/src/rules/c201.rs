//! C201: One component per file. A module should declare a single UI component.

use lintel_common::LintResult;
use lintel_diagnostics::{Category, DiagnosticCode, Label, Severity};
use lintel_syntax::{NodeId, NodeKind, NodeTag, SyntaxTree};
use rustc_hash::FxHashSet;

use crate::context::{message_data, RuleContext};
use crate::helpers::{component_declaration, is_module_scope, skip_parens};
use crate::{LintRule, RuleMeta, RuleSession};

static META: RuleMeta = RuleMeta {
    name: "one-component-per-file",
    code: DiagnosticCode::new(Category::Convention, 201),
    description: "file declares more than one component",
    default_severity: Severity::Warning,
    fixable: false,
    messages: &[(
        "multipleComponents",
        "File declares {{ count }} components ({{ names }}); keep one component per file",
    )],
    options: &[],
};

/// Counts module-level components and reports when there is more than one.
///
/// A component attached to another as `Main.Sub = Sub` is a compound child
/// and does not count, wherever the assignment appears in the file.
pub struct OneComponentPerFile;

impl LintRule for OneComponentPerFile {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscriptions(&self) -> &'static [NodeTag] {
        &[
            NodeTag::FunctionDeclaration,
            NodeTag::VariableDeclarator,
            NodeTag::ClassDeclaration,
            NodeTag::AssignmentExpression,
        ]
    }

    fn create(&self) -> Box<dyn RuleSession + '_> {
        Box::new(Session::default())
    }
}

#[derive(Default)]
struct Session {
    /// Components in source order.
    components: Vec<(String, NodeId)>,
    compound_children: FxHashSet<String>,
}

impl RuleSession for Session {
    fn visit(&mut self, node: NodeId, cx: &mut RuleContext<'_>) -> LintResult<()> {
        let tree = cx.tree();
        if let NodeKind::AssignmentExpression { .. } = tree.kind(node) {
            if let Some(child) = compound_child(tree, node) {
                self.compound_children.insert(child.to_string());
            }
            return Ok(());
        }
        if !is_module_scope(tree, node) {
            return Ok(());
        }
        if let Some(name) = component_declaration(tree, node) {
            self.components.push((name, node));
        }
        Ok(())
    }

    fn finish(&mut self, cx: &mut RuleContext<'_>) -> LintResult<()> {
        let survivors: Vec<&(String, NodeId)> = self
            .components
            .iter()
            .filter(|(name, _)| !self.compound_children.contains(name))
            .collect();
        if survivors.len() < 2 {
            return Ok(());
        }
        let names: Vec<&str> = survivors.iter().map(|(name, _)| name.as_str()).collect();
        let data = message_data([
            ("count", survivors.len().to_string()),
            ("names", names.join(", ")),
        ]);
        let diag = cx
            .diagnostic(survivors[1].1, "multipleComponents", data)?
            .with_label(Label::related(
                cx.span(survivors[0].1),
                "first component declared here",
            ));
        cx.emit(diag);
        Ok(())
    }
}

/// Returns `Sub` for `Main.Sub = Sub`.
fn compound_child(tree: &SyntaxTree, assign: NodeId) -> Option<&str> {
    let NodeKind::AssignmentExpression {
        operator,
        left,
        right,
    } = tree.kind(assign)
    else {
        return None;
    };
    if operator != "=" {
        return None;
    }
    let NodeKind::MemberExpression {
        object,
        property,
        computed: false,
    } = tree.kind(*left)
    else {
        return None;
    };
    tree.ident_name(*object)?;
    tree.ident_name(*property)?;
    tree.ident_name(skip_parens(tree, *right))
}
