//! Tree queries shared by the rules.
//!
//! Every function here is total: a node that does not have the shape a query
//! expects yields `false`, `None`, or an empty result, never a panic or an
//! error. Node IDs that do not belong to the tree are treated the same way.

use lintel_common::is_pascal_case;
use lintel_syntax::{Function, LiteralValue, NodeId, NodeKind, SyntaxTree};

/// Returns the kind of `id`, or `None` for a foreign ID.
fn kind(tree: &SyntaxTree, id: NodeId) -> Option<&NodeKind> {
    tree.try_node(id).map(|n| &n.kind)
}

/// Returns the name of a JSX attribute with a plain identifier name.
///
/// Every attribute query goes through this check first.
pub fn attribute_name(tree: &SyntaxTree, attr: NodeId) -> Option<&str> {
    match kind(tree, attr)? {
        NodeKind::JsxAttribute { name, .. } => match kind(tree, *name)? {
            NodeKind::JsxIdentifier { name } => Some(name),
            _ => None,
        },
        _ => None,
    }
}

/// Returns the expression inside an attribute's `{...}` value, parentheses
/// stripped. `None` for string values, bare attributes, and `{}`.
pub fn attribute_expression(tree: &SyntaxTree, attr: NodeId) -> Option<NodeId> {
    attribute_name(tree, attr)?;
    let NodeKind::JsxAttribute { value: Some(value), .. } = kind(tree, attr)? else {
        return None;
    };
    match kind(tree, *value)? {
        NodeKind::JsxExpressionContainer {
            expression: Some(expr),
        } => Some(skip_parens(tree, *expr)),
        _ => None,
    }
}

/// Returns the string literal node and value of an attribute written as
/// `name="v"` or `name={"v"}`.
pub fn string_attribute(tree: &SyntaxTree, attr: NodeId) -> Option<(NodeId, &str)> {
    attribute_name(tree, attr)?;
    let NodeKind::JsxAttribute { value: Some(value), .. } = kind(tree, attr)? else {
        return None;
    };
    let literal = match kind(tree, *value)? {
        NodeKind::Literal(_) => *value,
        NodeKind::JsxExpressionContainer {
            expression: Some(expr),
        } => skip_parens(tree, *expr),
        _ => return None,
    };
    match kind(tree, literal)? {
        NodeKind::Literal(lit) => match &lit.value {
            LiteralValue::String(s) => Some((literal, s.as_str())),
            _ => None,
        },
        _ => None,
    }
}

/// Strips enclosing parentheses; foreign IDs are returned unchanged.
pub fn skip_parens(tree: &SyntaxTree, mut id: NodeId) -> NodeId {
    while let Some(NodeKind::ParenthesizedExpression { expression }) = kind(tree, id) {
        id = *expression;
    }
    id
}

/// `{ ... }` written in place.
pub fn is_inline_object(tree: &SyntaxTree, expr: NodeId) -> bool {
    matches!(
        kind(tree, skip_parens(tree, expr)),
        Some(NodeKind::ObjectExpression { .. })
    )
}

/// `() => ...` or `function () {}` written in place.
pub fn is_inline_function(tree: &SyntaxTree, expr: NodeId) -> bool {
    matches!(
        kind(tree, skip_parens(tree, expr)),
        Some(NodeKind::ArrowFunctionExpression(_) | NodeKind::FunctionExpression(_))
    )
}

/// `<X />` or `<>...</>`.
pub fn is_ui_element(tree: &SyntaxTree, expr: NodeId) -> bool {
    matches!(
        kind(tree, skip_parens(tree, expr)),
        Some(NodeKind::JsxElement { .. } | NodeKind::JsxFragment { .. })
    )
}

/// A bare identifier or a non-computed member path of identifiers
/// (`Icon`, `Icons.Check`): a reference, not a call and not a literal.
pub fn is_reference(tree: &SyntaxTree, expr: NodeId) -> bool {
    reference_path(tree, expr).is_some()
}

/// Returns the dotted path of a reference expression.
pub fn reference_path(tree: &SyntaxTree, expr: NodeId) -> Option<String> {
    match kind(tree, skip_parens(tree, expr))? {
        NodeKind::Identifier { name, .. } => Some(name.clone()),
        NodeKind::MemberExpression {
            object,
            property,
            computed: false,
        } => {
            let NodeKind::Identifier { name, .. } = kind(tree, *property)? else {
                return None;
            };
            Some(format!("{}.{name}", reference_path(tree, *object)?))
        }
        _ => None,
    }
}

/// Returns the opening element of a `JsxElement`.
pub fn opening_element(tree: &SyntaxTree, element: NodeId) -> Option<NodeId> {
    match kind(tree, element)? {
        NodeKind::JsxElement { opening, .. } => match kind(tree, *opening)? {
            NodeKind::JsxOpeningElement { .. } => Some(*opening),
            _ => None,
        },
        _ => None,
    }
}

/// Returns the tag name of a `JsxElement` or `JsxOpeningElement` (`div`, `Icons.Check`).
pub fn element_name(tree: &SyntaxTree, element: NodeId) -> Option<String> {
    let opening = match kind(tree, element)? {
        NodeKind::JsxOpeningElement { .. } => element,
        _ => opening_element(tree, element)?,
    };
    let NodeKind::JsxOpeningElement { name, .. } = kind(tree, opening)? else {
        return None;
    };
    jsx_name(tree, *name)
}

/// Renders a `JsxIdentifier` / `JsxMemberExpression` tag name.
pub fn jsx_name(tree: &SyntaxTree, name: NodeId) -> Option<String> {
    match kind(tree, name)? {
        NodeKind::JsxIdentifier { name } => Some(name.clone()),
        NodeKind::JsxMemberExpression { object, property } => Some(format!(
            "{}.{}",
            jsx_name(tree, *object)?,
            jsx_name(tree, *property)?
        )),
        _ => None,
    }
}

/// Returns the attributes of an element's opening tag (spreads included).
pub fn element_attributes(tree: &SyntaxTree, element: NodeId) -> &[NodeId] {
    let opening = match kind(tree, element) {
        Some(NodeKind::JsxOpeningElement { .. }) => Some(element),
        _ => opening_element(tree, element),
    };
    match opening.and_then(|o| kind(tree, o)) {
        Some(NodeKind::JsxOpeningElement { attributes, .. }) => attributes,
        _ => &[],
    }
}

/// Returns `true` for JSX elements and fragments.
pub fn is_jsx_node(tree: &SyntaxTree, id: NodeId) -> bool {
    matches!(
        kind(tree, id),
        Some(NodeKind::JsxElement { .. } | NodeKind::JsxFragment { .. })
    )
}

/// Returns `true` for a JSX element or fragment not nested in another one.
pub fn is_top_level_jsx(tree: &SyntaxTree, id: NodeId) -> bool {
    is_jsx_node(tree, id) && !tree.ancestors(id).any(|a| is_jsx_node(tree, a))
}

/// Returns `true` for an `<svg>` (or react-native-svg `<Svg>`) element with
/// no SVG ancestor.
pub fn is_svg_root(tree: &SyntaxTree, element: NodeId) -> bool {
    let is_svg = |id| element_name(tree, id).is_some_and(|n| n == "svg" || n == "Svg");
    matches!(kind(tree, element), Some(NodeKind::JsxElement { .. }))
        && is_svg(element)
        && !tree
            .ancestors(element)
            .any(|a| matches!(kind(tree, a), Some(NodeKind::JsxElement { .. })) && is_svg(a))
}

/// Returns the function payload of a function declaration or expression.
pub fn as_function(tree: &SyntaxTree, id: NodeId) -> Option<&Function> {
    kind(tree, id)?.as_function()
}

/// Returns the nearest enclosing function of `node` (not `node` itself).
pub fn enclosing_function(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    tree.ancestors(node).find(|a| as_function(tree, *a).is_some())
}

/// Returns the name a function is bound to.
///
/// Uses the function's own id, or the variable declarator it initializes
/// (looking through parentheses and wrapper calls such as `memo(...)`).
pub fn function_binding_name(tree: &SyntaxTree, func: NodeId) -> Option<String> {
    let f = as_function(tree, func)?;
    if let Some(id) = f.id {
        return tree.ident_name(id).map(str::to_string);
    }
    let mut current = func;
    for parent in tree.ancestors(func) {
        match kind(tree, parent)? {
            NodeKind::ParenthesizedExpression { .. } => {}
            NodeKind::CallExpression { arguments, .. } if arguments.contains(&current) => {}
            NodeKind::VariableDeclarator { id, init } if *init == Some(current) => {
                return tree.ident_name(*id).map(str::to_string);
            }
            _ => return None,
        }
        current = parent;
    }
    None
}

/// Resolves the component a node belongs to: the nearest enclosing function
/// with a binding name, walking outward through anonymous callbacks.
pub fn owning_component(tree: &SyntaxTree, node: NodeId) -> Option<(NodeId, String)> {
    let mut current = node;
    while let Some(func) = enclosing_function(tree, current) {
        if let Some(name) = function_binding_name(tree, func) {
            return Some((func, name));
        }
        current = func;
    }
    None
}

/// Returns the parameter binding of `name` in `func`.
///
/// Plain parameters return the identifier; destructured props return the
/// property key (which names the prop even when renamed).
pub fn param_binding(tree: &SyntaxTree, func: NodeId, name: &str) -> Option<NodeId> {
    let f = as_function(tree, func)?;
    f.params.iter().find_map(|p| pattern_binding(tree, *p, name))
}

fn pattern_binding(tree: &SyntaxTree, pattern: NodeId, name: &str) -> Option<NodeId> {
    match kind(tree, pattern)? {
        NodeKind::Identifier { name: n, .. } if n == name => Some(pattern),
        NodeKind::AssignmentPattern { left, .. } => pattern_binding(tree, *left, name),
        NodeKind::ObjectPattern { properties, .. } => properties.iter().find_map(|prop| {
            let NodeKind::Property { key, value, .. } = kind(tree, *prop)? else {
                return None;
            };
            pattern_binding(tree, *value, name).map(|_| *key)
        }),
        _ => None,
    }
}

/// Returns the name of the first parameter when it is a plain identifier
/// (the `props` in `function Card(props)`).
pub fn props_param_name(tree: &SyntaxTree, func: NodeId) -> Option<&str> {
    let first = *as_function(tree, func)?.params.first()?;
    tree.ident_name(skip_default(tree, first))
}

fn skip_default(tree: &SyntaxTree, id: NodeId) -> NodeId {
    match kind(tree, id) {
        Some(NodeKind::AssignmentPattern { left, .. }) => *left,
        _ => id,
    }
}

/// Returns `true` if the function renders UI: a concise JSX body, a `return`
/// of JSX (through parentheses, `cond ? <a/> : b`, `ok && <a/>`), or a
/// `return x` where `x` is a local bound to JSX in the same body.
pub fn returns_jsx(tree: &SyntaxTree, func: NodeId) -> bool {
    let Some(f) = as_function(tree, func) else {
        return false;
    };
    if !matches!(kind(tree, f.body), Some(NodeKind::BlockStatement { .. })) {
        return yields_jsx(tree, f.body);
    }
    let mut jsx_locals: Vec<&str> = Vec::new();
    let mut returned: Vec<NodeId> = Vec::new();
    collect_body(tree, f.body, &mut jsx_locals, &mut returned);
    returned.iter().any(|r| {
        yields_jsx(tree, *r)
            || tree
                .ident_name(skip_parens(tree, *r))
                .is_some_and(|n| jsx_locals.contains(&n))
    })
}

/// Walks a function body without entering nested functions.
fn collect_body<'t>(
    tree: &'t SyntaxTree,
    id: NodeId,
    jsx_locals: &mut Vec<&'t str>,
    returned: &mut Vec<NodeId>,
) {
    let Some(k) = kind(tree, id) else {
        return;
    };
    match k {
        NodeKind::ReturnStatement { argument: Some(arg) } => returned.push(*arg),
        NodeKind::VariableDeclarator {
            id: binding,
            init: Some(init),
        } if yields_jsx(tree, *init) => {
            if let Some(name) = tree.ident_name(*binding) {
                jsx_locals.push(name);
            }
        }
        _ if k.is_function() || matches!(k, NodeKind::ClassDeclaration { .. }) => return,
        _ => {}
    }
    for child in k.children() {
        collect_body(tree, child, jsx_locals, returned);
    }
}

fn yields_jsx(tree: &SyntaxTree, expr: NodeId) -> bool {
    let expr = skip_parens(tree, expr);
    match kind(tree, expr) {
        Some(NodeKind::JsxElement { .. } | NodeKind::JsxFragment { .. }) => true,
        Some(NodeKind::ConditionalExpression {
            consequent,
            alternate,
            ..
        }) => yields_jsx(tree, *consequent) || yields_jsx(tree, *alternate),
        Some(NodeKind::BinaryExpression {
            operator, right, ..
        }) if operator == "&&" || operator == "||" || operator == "??" => yields_jsx(tree, *right),
        _ => false,
    }
}

/// Returns `true` for a class whose `render` method returns JSX.
pub fn is_class_component(tree: &SyntaxTree, class: NodeId) -> bool {
    let Some(NodeKind::ClassDeclaration { body, .. }) = kind(tree, class) else {
        return false;
    };
    body.iter().any(|m| match kind(tree, *m) {
        Some(NodeKind::MethodDefinition { key, value }) => key == "render" && returns_jsx(tree, *value),
        _ => false,
    })
}

/// Returns the name and anchor of a module-level component declaration.
///
/// Recognizes `function Name() { return <.../>; }`, `const Name = () => <.../>`
/// (also wrapped in `memo`/`forwardRef`), and classes with a JSX `render`.
/// The name must be PascalCase.
pub fn component_declaration(tree: &SyntaxTree, node: NodeId) -> Option<String> {
    let name = match kind(tree, node)? {
        NodeKind::FunctionDeclaration(f) => {
            if !returns_jsx(tree, node) {
                return None;
            }
            tree.ident_name(f.id?)?.to_string()
        }
        NodeKind::ClassDeclaration { id, .. } => {
            if !is_class_component(tree, node) {
                return None;
            }
            tree.ident_name((*id)?)?.to_string()
        }
        NodeKind::VariableDeclarator { id, init } => {
            let func = unwrap_component_wrapper(tree, (*init)?);
            if as_function(tree, func).is_none() || !returns_jsx(tree, func) {
                return None;
            }
            tree.ident_name(*id)?.to_string()
        }
        _ => return None,
    };
    is_pascal_case(&name).then_some(name)
}

/// Looks through parentheses and `memo(...)`/`forwardRef(...)` wrappers.
pub fn unwrap_component_wrapper(tree: &SyntaxTree, mut expr: NodeId) -> NodeId {
    loop {
        expr = skip_parens(tree, expr);
        match kind(tree, expr) {
            Some(NodeKind::CallExpression { callee, arguments }) if arguments.len() == 1 => {
                let wraps = reference_path(tree, *callee).is_some_and(|p| {
                    matches!(
                        p.as_str(),
                        "memo" | "React.memo" | "forwardRef" | "React.forwardRef"
                    )
                });
                if !wraps {
                    return expr;
                }
                expr = arguments[0];
            }
            _ => return expr,
        }
    }
}

/// Returns `true` for `memo(x)` or `React.memo(x)`.
pub fn is_memo_call(tree: &SyntaxTree, expr: NodeId) -> bool {
    match kind(tree, skip_parens(tree, expr)) {
        Some(NodeKind::CallExpression { callee, .. }) => {
            reference_path(tree, *callee).is_some_and(|p| p == "memo" || p == "React.memo")
        }
        _ => false,
    }
}

/// Returns `true` if `node` sits at module scope (directly, or as the
/// declaration of an export, or as a declarator of a module-scope
/// variable statement).
pub fn is_module_scope(tree: &SyntaxTree, node: NodeId) -> bool {
    let mut current = node;
    while let Some(parent) = tree.parent(current) {
        match kind(tree, parent) {
            Some(NodeKind::Program { .. }) => return true,
            Some(
                NodeKind::ExportNamedDeclaration { .. }
                | NodeKind::ExportDefaultDeclaration { .. }
                | NodeKind::VariableDeclaration { .. },
            ) => current = parent,
            _ => return false,
        }
    }
    false
}

/// Returns the top-level statements of the program.
pub fn program_body(tree: &SyntaxTree) -> &[NodeId] {
    match kind(tree, tree.root()) {
        Some(NodeKind::Program { body }) => body,
        _ => &[],
    }
}

/// Returns the top-level `import` declarations, in source order.
pub fn imports(tree: &SyntaxTree) -> Vec<NodeId> {
    program_body(tree)
        .iter()
        .copied()
        .filter(|s| matches!(kind(tree, *s), Some(NodeKind::ImportDeclaration { .. })))
        .collect()
}

/// Finds the module-level function or arrow bound to `name`.
pub fn find_module_function(tree: &SyntaxTree, name: &str) -> Option<NodeId> {
    program_body(tree).iter().find_map(|stmt| {
        let stmt = match kind(tree, *stmt)? {
            NodeKind::ExportNamedDeclaration {
                declaration: Some(d),
            } => *d,
            NodeKind::ExportDefaultDeclaration { declaration } => *declaration,
            _ => *stmt,
        };
        match kind(tree, stmt)? {
            NodeKind::FunctionDeclaration(f) => {
                (tree.ident_name(f.id?)? == name).then_some(stmt)
            }
            NodeKind::VariableDeclaration { declarations, .. } => {
                declarations.iter().find_map(|d| match kind(tree, *d)? {
                    NodeKind::VariableDeclarator { id, init: Some(init) }
                        if tree.ident_name(*id) == Some(name) =>
                    {
                        let func = unwrap_component_wrapper(tree, *init);
                        as_function(tree, func).map(|_| func)
                    }
                    _ => None,
                })
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintel_syntax::TreeBuilder;

    #[test]
    fn attribute_shapes() {
        let mut b = TreeBuilder::new("a.tsx");
        let s = b.jsx_attr_str("fill", "red");
        let red = b.string("blue");
        let wrapped = b.jsx_attr_expr("stroke", red);
        let obj = b.object(&[]);
        let style = b.jsx_attr_expr("style", obj);
        let bare = b.jsx_attr("disabled", None);
        let el = b.element("path", &[s, wrapped, style, bare], &[]);
        let stmt = b.expr_stmt(el);
        let program = b.program(&[stmt]);
        let tree = b.finish(program).tree;

        assert_eq!(attribute_name(&tree, s), Some("fill"));
        assert_eq!(string_attribute(&tree, s).map(|(_, v)| v), Some("red"));
        assert_eq!(string_attribute(&tree, wrapped).map(|(_, v)| v), Some("blue"));
        assert_eq!(string_attribute(&tree, style), None);
        assert!(attribute_expression(&tree, s).is_none());
        assert!(attribute_expression(&tree, bare).is_none());
        assert!(is_inline_object(&tree, attribute_expression(&tree, style).unwrap()));
        assert_eq!(element_attributes(&tree, el).len(), 4);
        // Not an attribute at all.
        assert_eq!(attribute_name(&tree, el), None);
        assert_eq!(attribute_name(&tree, NodeId::from_raw(9999)), None);
    }

    #[test]
    fn references_and_elements() {
        let mut b = TreeBuilder::new("a.tsx");
        let icon = b.ident("Icon");
        let path = b.path("Icons.Check");
        let callee = b.ident("make");
        let call = b.call(callee, &[]);
        let el = b.element("Icons.Check", &[], &[]);
        let p = b.paren(el);
        let arr = b.array(&[icon, path, call, p]);
        let stmt = b.expr_stmt(arr);
        let program = b.program(&[stmt]);
        let tree = b.finish(program).tree;

        assert_eq!(reference_path(&tree, path).as_deref(), Some("Icons.Check"));
        assert!(is_reference(&tree, icon));
        assert!(!is_reference(&tree, call));
        assert!(!is_reference(&tree, el));
        assert!(is_ui_element(&tree, p));
        assert_eq!(element_name(&tree, el).as_deref(), Some("Icons.Check"));
    }

    #[test]
    fn component_heuristics() {
        let mut b = TreeBuilder::new("a.tsx");
        // function Card() { const view = <div />; return view; }
        let div = b.element("div", &[], &[]);
        let view = b.ident("view");
        let decl = b.const_decl(view, div);
        let view_ref = b.ident("view");
        let ret = b.ret(Some(view_ref));
        let body = b.block(&[decl, ret]);
        let card = b.function_decl("Card", &[], body);
        // const Row = memo(() => <li />);
        let li = b.element("li", &[], &[]);
        let arrow = b.arrow(&[], li);
        let memo = b.ident("memo");
        let wrapped = b.call(memo, &[arrow]);
        let row_id = b.ident("Row");
        let row = b.declarator(row_id, Some(wrapped));
        let row_decl = b.var_decl(lintel_syntax::VarKind::Const, &[row]);
        // function helper() { return 1; }
        let one = b.number(1.0);
        let helper_body = b.returning(one);
        let helper = b.function_decl("Helper", &[], helper_body);
        let program = b.program(&[card, row_decl, helper]);
        let tree = b.finish(program).tree;

        assert_eq!(component_declaration(&tree, card).as_deref(), Some("Card"));
        assert_eq!(component_declaration(&tree, row).as_deref(), Some("Row"));
        assert_eq!(component_declaration(&tree, helper), None);
        assert!(is_module_scope(&tree, row));
        assert_eq!(function_binding_name(&tree, arrow).as_deref(), Some("Row"));
        assert_eq!(find_module_function(&tree, "Row"), Some(arrow));
        assert_eq!(find_module_function(&tree, "Card"), Some(card));
    }

    #[test]
    fn owning_component_walks_through_callbacks() {
        let mut b = TreeBuilder::new("a.tsx");
        // function List({ Item }) { return items.map(() => <Item />); }
        let item_prop = b.shorthand_prop("Item");
        let pattern = b.object_pattern(&[item_prop], None);
        let use_item = b.element("Item", &[], &[]);
        let cb = b.arrow(&[], use_item);
        let items = b.ident("items");
        let map = b.member(items, "map");
        let call = b.call(map, &[cb]);
        let body = b.returning(call);
        let list = b.function_decl("List", &[pattern], body);
        let program = b.program(&[list]);
        let tree = b.finish(program).tree;

        let (func, name) = owning_component(&tree, use_item).unwrap();
        assert_eq!(func, list);
        assert_eq!(name, "List");
        assert!(param_binding(&tree, list, "Item").is_some());
        assert!(param_binding(&tree, list, "Other").is_none());
        assert!(returns_jsx(&tree, cb));
    }

    #[test]
    fn svg_root_detection() {
        let mut b = TreeBuilder::new("a.tsx");
        let inner = b.element("svg", &[], &[]);
        let g = b.element("g", &[], &[inner]);
        let outer = b.element("svg", &[], &[g]);
        let stmt = b.expr_stmt(outer);
        let program = b.program(&[stmt]);
        let tree = b.finish(program).tree;
        assert!(is_svg_root(&tree, outer));
        assert!(!is_svg_root(&tree, inner));
        assert!(!is_svg_root(&tree, g));
        assert!(is_top_level_jsx(&tree, outer));
        assert!(!is_top_level_jsx(&tree, g));
    }
}
