//! W104: Empty catch. A `catch` block that silently swallows the error.

use lintel_common::LintResult;
use lintel_diagnostics::{Category, DiagnosticCode, Severity};
use lintel_syntax::{NodeId, NodeKind, NodeTag};

use crate::context::{MessageData, RuleContext};
use crate::{LintRule, RuleMeta, RuleSession};

static META: RuleMeta = RuleMeta {
    name: "no-empty-catch",
    code: DiagnosticCode::new(Category::Warning, 104),
    description: "catch block is empty",
    default_severity: Severity::Warning,
    fixable: true,
    messages: &[(
        "emptyCatch",
        "Empty catch block silently swallows errors; handle or rethrow the error",
    )],
    options: &[],
};

/// Flags `catch` clauses with an empty block.
///
/// A block holding only a comment is treated as intentionally empty. The fix
/// rethrows the bound error, binding `error` first when the clause has no
/// parameter. Destructured parameters get no fix.
pub struct NoEmptyCatch;

impl LintRule for NoEmptyCatch {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscriptions(&self) -> &'static [NodeTag] {
        &[NodeTag::CatchClause]
    }

    fn create(&self) -> Box<dyn RuleSession + '_> {
        Box::new(Session)
    }
}

struct Session;

impl RuleSession for Session {
    fn visit(&mut self, node: NodeId, cx: &mut RuleContext<'_>) -> LintResult<()> {
        let tree = cx.tree();
        let NodeKind::CatchClause { param, body } = tree.kind(node) else {
            return Ok(());
        };
        let NodeKind::BlockStatement { body: stmts } = tree.kind(*body) else {
            return Ok(());
        };
        if !stmts.is_empty() || has_comment(cx.text(*body)) {
            return Ok(());
        }

        let mut fixer = cx.fixer();
        match param.map(|p| tree.kind(p)) {
            Some(NodeKind::Identifier { name, .. }) => {
                fixer.replace(tree.span(*body), format!("{{ throw {name}; }}"));
            }
            None => {
                fixer.replace(tree.span(node), "catch (error) { throw error; }");
            }
            Some(_) => {}
        }
        let fix = fixer.finish("rethrow the caught error");
        cx.report_with_fix(node, "emptyCatch", MessageData::new(), fix)
    }
}

fn has_comment(block: &str) -> bool {
    block.contains("//") || block.contains("/*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::check;
    use lintel_diagnostics::apply_fixes;
    use lintel_syntax::{BuiltTree, TreeBuilder};

    /// `try { run(); } catch <param> <body>`
    fn try_catch(
        param: impl FnOnce(&mut TreeBuilder) -> Option<NodeId>,
        body: impl FnOnce(&mut TreeBuilder) -> NodeId,
    ) -> BuiltTree {
        let mut b = TreeBuilder::new("src/api.ts");
        let run = b.ident("run");
        let call = b.call(run, &[]);
        let stmt = b.expr_stmt(call);
        let block = b.block(&[stmt]);
        let param = param(&mut b);
        let body = body(&mut b);
        let handler = b.catch_clause(param, body);
        let try_stmt = b.try_stmt(block, Some(handler), None);
        let program = b.program(&[try_stmt]);
        b.finish(program)
    }

    fn empty(b: &mut TreeBuilder) -> NodeId {
        b.block(&[])
    }

    fn fixed(built: &BuiltTree) -> String {
        let diags = check(NoEmptyCatch, built);
        assert_eq!(diags.len(), 1);
        let fix = diags[0].fix.as_ref().expect("fix");
        apply_fixes(&built.source.content, [fix]).0
    }

    #[test]
    fn named_param_is_rethrown() {
        let built = try_catch(|b| Some(b.ident("err")), empty);
        assert_eq!(
            fixed(&built),
            "try { run(); } catch (err) { throw err; }\n"
        );
    }

    #[test]
    fn missing_param_is_bound() {
        let built = try_catch(|_| None, empty);
        assert_eq!(
            fixed(&built),
            "try { run(); } catch (error) { throw error; }\n"
        );
    }

    #[test]
    fn destructured_param_gets_no_fix() {
        let built = try_catch(
            |b| {
                let message = b.shorthand_prop("message");
                Some(b.object_pattern(&[message], None))
            },
            empty,
        );
        let diags = check(NoEmptyCatch, &built);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].fix.is_none());
    }

    #[test]
    fn non_empty_block_is_fine() {
        let built = try_catch(
            |b| Some(b.ident("err")),
            |b| {
                let log = b.path("console.error");
                let err = b.ident("err");
                let call = b.call(log, &[err]);
                let stmt = b.expr_stmt(call);
                b.block(&[stmt])
            },
        );
        assert!(check(NoEmptyCatch, &built).is_empty());
    }

    #[test]
    fn commented_block_is_intentional() {
        assert!(has_comment("{ /* ignored */ }"));
        assert!(has_comment("{\n  // best effort\n}"));
        assert!(!has_comment("{ }"));
    }

    #[test]
    fn fix_is_attached_at_warning_severity() {
        let built = try_catch(|b| Some(b.ident("err")), empty);
        let diags = check(NoEmptyCatch, &built);
        assert!(diags[0].is_fixable());
        assert_eq!(diags[0].severity, Severity::Warning);
    }
}
