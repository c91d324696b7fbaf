//! E101: JSX element / component mismatch. A prop is passed one way and
//! consumed the other way inside the receiving component.
//!
//! `<Card Icon={<Check />} />` hands `Card` a rendered element; rendering it
//! as `<Icon />` inside `Card` is a bug. `<Card Icon={Check} />` hands it a
//! component; embedding it as `{Icon}` renders nothing useful. Instantiation
//! sites and usage sites may appear in any order, so both sides are recorded
//! during the walk and matched in `finish`.

use lintel_common::LintResult;
use lintel_diagnostics::{Category, DiagnosticCode, Label, Severity};
use lintel_syntax::{NodeId, NodeKind, NodeTag, SyntaxTree};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::context::{message_data, RuleContext};
use crate::helpers::{
    attribute_expression, attribute_name, element_name, enclosing_function,
    function_binding_name, is_reference, is_ui_element, jsx_name, owning_component,
    param_binding, props_param_name, skip_parens,
};
use crate::{LintRule, RuleMeta, RuleSession};

static META: RuleMeta = RuleMeta {
    name: "jsx-element-component-mismatch",
    code: DiagnosticCode::new(Category::Error, 101),
    description: "prop is passed as an element but used as a component, or the reverse",
    default_severity: Severity::Error,
    fixable: false,
    messages: &[
        (
            "elementAsComponent",
            "Prop '{{ prop }}' of '{{ component }}' receives a JSX element but is rendered as a component; embed it as an expression instead",
        ),
        (
            "componentAsValue",
            "Prop '{{ prop }}' of '{{ component }}' receives a component but is embedded as a value; render it as a tag instead",
        ),
    ],
    options: &[],
};

/// Cross-checks how a prop is passed against how the receiving component
/// uses it.
pub struct JsxElementComponentMismatch;

impl LintRule for JsxElementComponentMismatch {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscriptions(&self) -> &'static [NodeTag] {
        &[
            NodeTag::JsxAttribute,
            NodeTag::JsxOpeningElement,
            NodeTag::JsxExpressionContainer,
        ]
    }

    fn create(&self) -> Box<dyn RuleSession + '_> {
        Box::new(Session::default())
    }
}

/// What an instantiation site passes for a prop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Passed {
    /// `prop={<X />}` or `prop=<X />`
    Element,
    /// `prop={X}` or `prop={Ns.X}`
    Reference,
}

/// How the receiving component consumes a prop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Used {
    /// `<Prop />`
    Tag,
    /// `{Prop}`
    Value,
}

struct Usage {
    component: String,
    prop: String,
    node: NodeId,
    used: Used,
}

#[derive(Default)]
struct Session {
    /// component name → prop name → (passed kind, attribute). First seen wins.
    passed: FxHashMap<String, FxHashMap<String, (Passed, NodeId)>>,
    /// Usages in source order, one per (component function, prop).
    usages: Vec<Usage>,
    seen: FxHashSet<(NodeId, String)>,
}

impl RuleSession for Session {
    fn visit(&mut self, node: NodeId, cx: &mut RuleContext<'_>) -> LintResult<()> {
        let tree = cx.tree();
        match tree.kind(node) {
            NodeKind::JsxAttribute { .. } => self.record_passed(tree, node),
            NodeKind::JsxOpeningElement { name, .. } => {
                if let Some(tag) = jsx_name(tree, *name) {
                    self.record_usage(tree, node, &tag, Used::Tag);
                }
            }
            NodeKind::JsxExpressionContainer {
                expression: Some(expr),
            } => {
                // Attribute values pass a prop on; only children render it.
                let in_attribute = tree
                    .parent(node)
                    .is_some_and(|p| matches!(tree.kind(p), NodeKind::JsxAttribute { .. }));
                if !in_attribute {
                    let expr = skip_parens(tree, *expr);
                    if let Some(path) = value_path(tree, expr) {
                        self.record_usage(tree, node, &path, Used::Value);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(&mut self, cx: &mut RuleContext<'_>) -> LintResult<()> {
        for usage in &self.usages {
            let Some(&(passed, attr)) = self
                .passed
                .get(&usage.component)
                .and_then(|props| props.get(&usage.prop))
            else {
                continue;
            };
            let (message_id, label) = match (passed, usage.used) {
                (Passed::Element, Used::Tag) => ("elementAsComponent", "a JSX element is passed here"),
                (Passed::Reference, Used::Value) => ("componentAsValue", "a component is passed here"),
                _ => continue,
            };
            let data = message_data([
                ("prop", usage.prop.as_str()),
                ("component", usage.component.as_str()),
            ]);
            let diag = cx
                .diagnostic(usage.node, message_id, data)?
                .with_label(Label::related(cx.span(attr), label));
            cx.emit(diag);
        }
        Ok(())
    }
}

impl Session {
    fn record_passed(&mut self, tree: &SyntaxTree, attr: NodeId) {
        let Some(prop) = attribute_name(tree, attr) else {
            return;
        };
        let Some(opening) = tree.parent(attr) else {
            return;
        };
        let Some(component) = element_name(tree, opening) else {
            return;
        };
        if !component.starts_with(|c: char| c.is_ascii_uppercase()) {
            return;
        }
        let Some(kind) = passed_kind(tree, attr) else {
            return;
        };
        self.passed
            .entry(component)
            .or_default()
            .entry(prop.to_string())
            .or_insert((kind, attr));
    }

    /// Records `path` (`Prop` or `props.Prop`) as used inside the component
    /// that declares it as a parameter.
    fn record_usage(&mut self, tree: &SyntaxTree, node: NodeId, path: &str, used: Used) {
        let Some((func, prop)) = declaring_function(tree, node, path) else {
            return;
        };
        let component = match function_binding_name(tree, func) {
            Some(name) => name,
            None => match owning_component(tree, func) {
                Some((_, name)) => name,
                None => return,
            },
        };
        if !self.seen.insert((func, prop.clone())) {
            return;
        }
        self.usages.push(Usage {
            component,
            prop,
            node,
            used,
        });
    }
}

fn passed_kind(tree: &SyntaxTree, attr: NodeId) -> Option<Passed> {
    if let NodeKind::JsxAttribute {
        value: Some(value), ..
    } = tree.kind(attr)
    {
        if is_ui_element(tree, *value) {
            return Some(Passed::Element);
        }
    }
    let expr = attribute_expression(tree, attr)?;
    if is_ui_element(tree, expr) {
        Some(Passed::Element)
    } else if is_reference(tree, expr) {
        Some(Passed::Reference)
    } else {
        None
    }
}

/// `Prop` or `props.Prop` in expression position.
fn value_path(tree: &SyntaxTree, expr: NodeId) -> Option<String> {
    match tree.kind(expr) {
        NodeKind::Identifier { name, .. } => Some(name.clone()),
        NodeKind::MemberExpression {
            object,
            property,
            computed: false,
        } => Some(format!(
            "{}.{}",
            tree.ident_name(*object)?,
            tree.ident_name(*property)?
        )),
        _ => None,
    }
}

/// Finds the nearest enclosing function that declares the prop `path` refers
/// to, walking outward. Returns the function and the prop name.
fn declaring_function(tree: &SyntaxTree, node: NodeId, path: &str) -> Option<(NodeId, String)> {
    let (head, prop) = match path.split_once('.') {
        Some((head, prop)) if !prop.contains('.') => (head, Some(prop)),
        Some(_) => return None,
        None => (path, None),
    };
    let mut scope = node;
    while let Some(func) = enclosing_function(tree, scope) {
        match prop {
            None => {
                // `{ Icon: Glyph }` binds `Glyph` locally but receives `Icon`.
                if let Some(binding) = param_binding(tree, func, head) {
                    let prop_name = tree.ident_name(binding).unwrap_or(head);
                    return Some((func, prop_name.to_string()));
                }
            }
            Some(prop) if props_param_name(tree, func) == Some(head) => {
                return Some((func, prop.to_string()));
            }
            Some(_) => {}
        }
        scope = func;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::check;
    use lintel_syntax::{BuiltTree, TreeBuilder};

    #[derive(Clone, Copy)]
    enum Pass {
        Element,
        Reference,
    }

    /// Builds a receiving component and an instantiation site, in either order:
    ///
    /// ```text
    /// function Card({ TestProp }) { return <div>{consume}</div>; }
    /// const view = <Card TestProp={pass} />;
    /// ```
    fn file(pass: Pass, consume: Used, usage_first: bool) -> BuiltTree {
        let mut b = TreeBuilder::new("src/Card.tsx");
        let prop = b.shorthand_prop("TestProp");
        let pattern = b.object_pattern(&[prop], None);
        let inner = match consume {
            Used::Tag => b.element("TestProp", &[], &[]),
            Used::Value => {
                let id = b.ident("TestProp");
                b.jsx_container(Some(id))
            }
        };
        let div = b.element("div", &[], &[inner]);
        let body = b.returning(div);
        let card = b.function_decl("Card", &[pattern], body);

        let value = match pass {
            Pass::Element => b.element("Icon", &[], &[]),
            Pass::Reference => b.ident("Icon"),
        };
        let attr = b.jsx_attr_expr("TestProp", value);
        let site = b.element("Card", &[attr], &[]);
        let view = b.ident("view");
        let decl = b.const_decl(view, site);

        let body = if usage_first { [card, decl] } else { [decl, card] };
        let program = b.program(&body);
        b.finish(program)
    }

    #[test]
    fn element_rendered_as_tag_fires() {
        let built = file(Pass::Element, Used::Tag, true);
        let diags = check(JsxElementComponentMismatch, &built);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message_id, "elementAsComponent");
        assert_eq!(built.source.text(diags[0].primary_span), Some("<TestProp />"));
        assert_eq!(diags[0].labels.len(), 1);
        assert_eq!(
            built.source.text(diags[0].labels[0].span),
            Some("TestProp={<Icon />}")
        );
    }

    #[test]
    fn reference_embedded_as_value_fires() {
        let built = file(Pass::Reference, Used::Value, true);
        let diags = check(JsxElementComponentMismatch, &built);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message_id, "componentAsValue");
        assert_eq!(
            diags[0].message,
            "Prop 'TestProp' of 'Card' receives a component but is embedded as a value; render it as a tag instead"
        );
    }

    #[test]
    fn matching_kinds_are_fine() {
        for (pass, used) in [(Pass::Element, Used::Value), (Pass::Reference, Used::Tag)] {
            let built = file(pass, used, true);
            assert!(check(JsxElementComponentMismatch, &built).is_empty());
        }
    }

    #[test]
    fn instantiation_before_declaration_is_matched() {
        let built = file(Pass::Element, Used::Tag, false);
        let diags = check(JsxElementComponentMismatch, &built);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message_id, "elementAsComponent");
    }

    #[test]
    fn unknown_passed_kind_is_not_penalized() {
        // function Card({ TestProp }) { return <TestProp />; }  (never instantiated)
        let mut b = TreeBuilder::new("src/Card.tsx");
        let prop = b.shorthand_prop("TestProp");
        let pattern = b.object_pattern(&[prop], None);
        let el = b.element("TestProp", &[], &[]);
        let body = b.returning(el);
        let card = b.function_decl("Card", &[pattern], body);
        let program = b.program(&[card]);
        let built = b.finish(program);
        assert!(check(JsxElementComponentMismatch, &built).is_empty());
    }

    #[test]
    fn props_member_usage_inside_arrow_component() {
        // const Card = (props) => <props.Icon />;
        // const view = <Card Icon={<Check />} />;
        let mut b = TreeBuilder::new("src/Card.tsx");
        let props = b.ident("props");
        let el = b.element("props.Icon", &[], &[]);
        let arrow = b.arrow(&[props], el);
        let card_id = b.ident("Card");
        let card = b.const_decl(card_id, arrow);
        let check_el = b.element("Check", &[], &[]);
        let attr = b.jsx_attr_expr("Icon", check_el);
        let site = b.element("Card", &[attr], &[]);
        let stmt = b.expr_stmt(site);
        let program = b.program(&[card, stmt]);
        let built = b.finish(program);

        let diags = check(JsxElementComponentMismatch, &built);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].data.get("prop").map(String::as_str), Some("Icon"));
        assert_eq!(diags[0].data.get("component").map(String::as_str), Some("Card"));
    }

    #[test]
    fn renamed_destructured_prop_is_matched_by_prop_name() {
        // function Card({ Icon: Glyph }) { return <Glyph />; }
        // <Card Icon={<Check />} />;
        let mut b = TreeBuilder::new("src/Card.tsx");
        let glyph = b.ident("Glyph");
        let renamed = b.prop("Icon", glyph);
        let pattern = b.object_pattern(&[renamed], None);
        let el = b.element("Glyph", &[], &[]);
        let body = b.returning(el);
        let card = b.function_decl("Card", &[pattern], body);
        let check_el = b.element("Check", &[], &[]);
        let attr = b.jsx_attr_expr("Icon", check_el);
        let site = b.element("Card", &[attr], &[]);
        let stmt = b.expr_stmt(site);
        let program = b.program(&[card, stmt]);
        let built = b.finish(program);

        let diags = check(JsxElementComponentMismatch, &built);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message_id, "elementAsComponent");
        assert_eq!(diags[0].data.get("prop").map(String::as_str), Some("Icon"));
        assert_eq!(built.source.text(diags[0].primary_span), Some("<Glyph />"));
    }
}
