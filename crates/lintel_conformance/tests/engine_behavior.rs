//! Tests for engine-level behavior: checker-backed inference, fault
//! isolation between rules, and diagnostic rendering.

use lintel_common::{InternalError, LintResult};
use lintel_conformance::{build, lint, lint_with_types};
use lintel_config::LintelConfig;
use lintel_diagnostics::{Category, DiagnosticCode, Severity};
use lintel_lint::{LintEngine, LintRule, RuleContext, RuleMeta, RuleSession};
use lintel_syntax::{BuiltTree, NodeId, NodeTag, TsKeyword};
use lintel_types::TypeTable;

/// `const ready = isReady();` and `const visible = flag();`
fn unannotated_flags() -> (BuiltTree, NodeId) {
    let mut ready = None;
    let built = build("src/state.ts", |b| {
        let id = b.ident("ready");
        ready = Some(id);
        let callee = b.ident("isReady");
        let init = b.call(callee, &[]);
        let first = b.const_decl(id, init);
        let id = b.ident("visible");
        let flag = b.ident("flag");
        let init = b.call(flag, &[]);
        let second = b.const_decl(id, init);
        vec![first, second]
    });
    (built, ready.unwrap())
}

#[test]
fn checker_types_drive_boolean_naming() {
    let (built, ready) = unannotated_flags();
    assert!(lint(&built).diagnostics.is_empty());

    let mut types = TypeTable::new();
    let boolean = types.boolean();
    types.bind(ready, boolean);
    let outcome = lint_with_types(&built, &LintelConfig::default(), Some(&types));
    assert_eq!(outcome.codes(), vec!["C202"]);
    assert_eq!(
        outcome.diagnostics[0].data.get("name").map(String::as_str),
        Some("ready")
    );
}

#[test]
fn checker_type_overrides_the_annotation() {
    // const enabled: boolean = read(); with the checker resolving it to a string-like type.
    let mut enabled = None;
    let built = build("src/state.ts", |b| {
        let ann = b.ts_keyword(TsKeyword::Boolean);
        let id = b.typed_ident("enabled", ann);
        enabled = Some(id);
        let read = b.ident("read");
        let init = b.call(read, &[]);
        vec![b.const_decl(id, init)]
    });
    assert_eq!(lint(&built).codes(), vec!["C202"]);

    let mut types = TypeTable::new();
    let label = types.named("Label");
    types.bind(enabled.unwrap(), label);
    let outcome = lint_with_types(&built, &LintelConfig::default(), Some(&types));
    assert!(outcome.diagnostics.is_empty());
}

static FAULTY_META: RuleMeta = RuleMeta {
    name: "faulty-rule",
    code: DiagnosticCode::new(Category::Warning, 990),
    description: "reports every conditional, then fails on some of them",
    default_severity: Severity::Warning,
    fixable: false,
    messages: &[("seen", "Conditional seen")],
    options: &[],
};

/// Reports each conditional, then panics on the first and errors on the
/// second after reporting.
struct FaultyRule;

impl LintRule for FaultyRule {
    fn meta(&self) -> &'static RuleMeta {
        &FAULTY_META
    }

    fn subscriptions(&self) -> &'static [NodeTag] {
        &[NodeTag::ConditionalExpression]
    }

    fn create(&self) -> Box<dyn RuleSession + '_> {
        Box::new(FaultySession { calls: 0 })
    }
}

struct FaultySession {
    calls: usize,
}

impl RuleSession for FaultySession {
    fn visit(&mut self, node: NodeId, cx: &mut RuleContext<'_>) -> LintResult<()> {
        self.calls += 1;
        cx.report(node, "seen", Default::default())?;
        match self.calls {
            1 => panic!("predicate blew up"),
            2 => Err(InternalError::new("unexpected node shape")),
            _ => Ok(()),
        }
    }
}

#[test]
fn faulty_callbacks_do_not_disturb_other_rules() {
    // a ? (b ? 1 : 2) : 3;  c ? 4 : 5;
    let built = build("src/pick.ts", |b| {
        let bb = b.ident("b");
        let one = b.number(1.0);
        let two = b.number(2.0);
        let inner = b.cond(bb, one, two);
        let paren = b.paren(inner);
        let a = b.ident("a");
        let three = b.number(3.0);
        let outer = b.cond(a, paren, three);
        let first = b.expr_stmt(outer);
        let c = b.ident("c");
        let four = b.number(4.0);
        let five = b.number(5.0);
        let flat = b.cond(c, four, five);
        let second = b.expr_stmt(flat);
        vec![first, second]
    });

    let mut engine = LintEngine::with_defaults();
    engine.register(Box::new(FaultyRule));
    let diags = engine.lint(&built.tree, &built.source, None);

    let codes: Vec<String> = diags.iter().map(|d| d.code.to_string()).collect();
    // The first two callbacks fail and lose their reports; the third survives.
    assert_eq!(codes, vec!["W101", "W990"]);
    assert_eq!(built.source.text(diags[1].primary_span), Some("c ? 4 : 5"));
}

#[test]
fn diagnostics_render_for_terminals_and_json() {
    let built = build("src/services/api.ts", |b| {
        let el = b.element("b", &[], &[]);
        vec![b.expr_stmt(el)]
    });
    let outcome = lint(&built);

    let terminal = outcome.render_terminal();
    assert_eq!(terminal.len(), 1);
    assert!(terminal[0].starts_with("warning[C205] no-jsx-in-services:"));
    assert!(terminal[0].contains("src/services/api.ts:1:1"));

    let json = outcome.render_json();
    let value: serde_json::Value = serde_json::from_str(&json[0]).unwrap();
    assert_eq!(value["path"], "src/services/api.ts");
    assert_eq!(value["line"], 1);
    assert_eq!(value["rule"], "no-jsx-in-services");
    assert_eq!(value["message_id"], "jsxInService");
    assert_eq!(value["severity"], "warning");
}
