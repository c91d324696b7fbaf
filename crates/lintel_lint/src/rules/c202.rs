//! C202: Boolean naming. Boolean variables and parameters should read as a
//! question (`isOpen`, `hasError`).

use lintel_common::{split_words, to_pascal_case, LintResult};
use lintel_config::{ConfigError, RuleOptions};
use lintel_diagnostics::{Category, DiagnosticCode, Severity};
use lintel_syntax::{LiteralValue, NodeId, NodeKind, NodeTag, SyntaxTree};

use crate::context::{message_data, RuleContext};
use crate::helpers::{as_function, skip_parens};
use crate::{LintRule, OptionKind, RuleMeta, RuleOption, RuleSession};

static META: RuleMeta = RuleMeta {
    name: "boolean-naming",
    code: DiagnosticCode::new(Category::Convention, 202),
    description: "boolean binding lacks a question-like prefix",
    default_severity: Severity::Warning,
    fixable: false,
    messages: &[(
        "missingPrefix",
        "Boolean '{{ name }}' should start with a prefix such as 'is' or 'has' (e.g. '{{ suggestion }}')",
    )],
    options: &[
        RuleOption {
            key: "prefixes",
            kind: OptionKind::StringList,
            description: "accepted leading words",
        },
        RuleOption {
            key: "allowed_names",
            kind: OptionKind::StringList,
            description: "exact names accepted without a prefix",
        },
    ],
};

const DEFAULT_PREFIXES: &[&str] = &[
    "is", "has", "should", "can", "will", "did", "was", "are", "does",
];

const DEFAULT_ALLOWED_NAMES: &[&str] = &[
    "open", "disabled", "checked", "selected", "required", "hidden", "visible", "loading",
];

/// Checks the names of boolean variables and parameters.
///
/// A binding is boolean when the type layer says so (checker, then
/// annotation) or when it is initialized or defaulted to `true`/`false`.
pub struct BooleanNaming {
    prefixes: Vec<String>,
    allowed_names: Vec<String>,
}

impl Default for BooleanNaming {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES.iter().map(|s| s.to_string()).collect(),
            allowed_names: DEFAULT_ALLOWED_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl BooleanNaming {
    fn accepts(&self, name: &str) -> bool {
        if self.allowed_names.iter().any(|n| n == name) {
            return true;
        }
        let name = name.trim_start_matches('_');
        match split_words(name).first() {
            Some(first) => self.prefixes.iter().any(|p| p.eq_ignore_ascii_case(first)),
            None => true,
        }
    }
}

impl LintRule for BooleanNaming {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscriptions(&self) -> &'static [NodeTag] {
        &[
            NodeTag::VariableDeclarator,
            NodeTag::FunctionDeclaration,
            NodeTag::FunctionExpression,
            NodeTag::ArrowFunctionExpression,
        ]
    }

    fn create(&self) -> Box<dyn RuleSession + '_> {
        Box::new(Session { rule: self })
    }

    fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        options.check_keys(&["prefixes", "allowed_names"])?;
        if let Some(prefixes) = options.string_list("prefixes")? {
            self.prefixes = prefixes;
        }
        if let Some(names) = options.string_list("allowed_names")? {
            self.allowed_names = names;
        }
        Ok(())
    }
}

struct Session<'r> {
    rule: &'r BooleanNaming,
}

impl RuleSession for Session<'_> {
    fn visit(&mut self, node: NodeId, cx: &mut RuleContext<'_>) -> LintResult<()> {
        let tree = cx.tree();
        let mut bindings = Vec::new();
        match tree.kind(node) {
            NodeKind::VariableDeclarator { id, init } => {
                collect_bindings(tree, *id, *init, &mut bindings);
            }
            _ => {
                if let Some(f) = as_function(tree, node) {
                    for param in &f.params {
                        collect_bindings(tree, *param, None, &mut bindings);
                    }
                }
            }
        }

        for Binding { ident, name, literal } in bindings {
            if self.rule.accepts(name) {
                continue;
            }
            if !(literal || cx.infer_booleanness(ident)) {
                continue;
            }
            let suggestion = format!("is{}", to_pascal_case(name));
            cx.report(
                ident,
                "missingPrefix",
                message_data([("name", name.to_string()), ("suggestion", suggestion)]),
            )?;
        }
        Ok(())
    }
}

struct Binding<'t> {
    ident: NodeId,
    name: &'t str,
    /// Initialized or defaulted to a boolean literal.
    literal: bool,
}

/// Collects the identifiers a pattern binds, with the value they start from.
fn collect_bindings<'t>(
    tree: &'t SyntaxTree,
    pattern: NodeId,
    init: Option<NodeId>,
    out: &mut Vec<Binding<'t>>,
) {
    match tree.kind(pattern) {
        NodeKind::Identifier { name, .. } => out.push(Binding {
            ident: pattern,
            name,
            literal: init.is_some_and(|i| is_boolean_literal(tree, i)),
        }),
        NodeKind::AssignmentPattern { left, right } => {
            collect_bindings(tree, *left, Some(*right), out);
        }
        NodeKind::ObjectPattern { properties, .. } => {
            for prop in properties {
                if let NodeKind::Property { value, .. } = tree.kind(*prop) {
                    collect_bindings(tree, *value, None, out);
                }
            }
        }
        _ => {}
    }
}

fn is_boolean_literal(tree: &SyntaxTree, expr: NodeId) -> bool {
    matches!(
        tree.kind(skip_parens(tree, expr)),
        NodeKind::Literal(lit) if matches!(lit.value, LiteralValue::Boolean(_))
    )
}
