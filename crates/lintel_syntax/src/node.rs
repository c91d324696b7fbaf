//! Node kinds for the JavaScript/TypeScript + JSX subset the rules inspect.
//!
//! [`NodeKind`] is a closed enum carrying kind-specific children as [`NodeId`]s.
//! [`NodeTag`] is its fieldless discriminant, used by the engine to build a
//! kind-indexed dispatch table.

use crate::ids::NodeId;
use lintel_source::Span;
use serde::{Deserialize, Serialize};

/// A node stored in a [`SyntaxTree`](crate::SyntaxTree).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Kind-specific payload.
    pub kind: NodeKind,
    /// Byte range of the node in the original text.
    pub span: Span,
    /// Non-owning back-reference to the enclosing node. `None` for the root.
    pub parent: Option<NodeId>,
}

/// Declaration keyword of a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VarKind {
    /// `var`
    Var,
    /// `let`
    Let,
    /// `const`
    Const,
}

impl VarKind {
    /// Returns the source keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

/// Shared shape of function declarations, function expressions and arrows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Function {
    /// Binding name, if any.
    pub id: Option<NodeId>,
    /// Parameter patterns in order.
    pub params: Vec<NodeId>,
    /// Declared return type annotation.
    pub return_type: Option<NodeId>,
    /// Block body, or the expression body of a concise arrow.
    pub body: NodeId,
    /// `true` for `async` functions.
    pub is_async: bool,
}

/// A primitive literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    /// A string literal, unquoted.
    String(String),
    /// A numeric literal.
    Number(f64),
    /// `true` or `false`.
    Boolean(bool),
    /// `null`
    Null,
}

/// A literal with its raw source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    /// Decoded value.
    pub value: LiteralValue,
    /// Raw text as written, quotes included.
    pub raw: String,
}

impl Literal {
    /// Returns the string value if this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// TypeScript keyword types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TsKeyword {
    /// `boolean`
    Boolean,
    /// `string`
    String,
    /// `number`
    Number,
    /// `any`
    Any,
    /// `unknown`
    Unknown,
    /// `void`
    Void,
    /// `null`
    Null,
    /// `undefined`
    Undefined,
}

impl TsKeyword {
    /// Returns the source keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            TsKeyword::Boolean => "boolean",
            TsKeyword::String => "string",
            TsKeyword::Number => "number",
            TsKeyword::Any => "any",
            TsKeyword::Unknown => "unknown",
            TsKeyword::Void => "void",
            TsKeyword::Null => "null",
            TsKeyword::Undefined => "undefined",
        }
    }
}

/// Kind-specific node payload.
///
/// Child fields are listed in source order; [`NodeKind::children`] relies on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeKind {
    /// The root of a file.
    Program {
        /// Top-level statements.
        body: Vec<NodeId>,
    },

    /// `import ... from "source";`
    ImportDeclaration {
        /// Module specifier, unquoted.
        source: String,
        /// Specifier nodes in source order.
        specifiers: Vec<NodeId>,
        /// `true` for `import type`.
        type_only: bool,
    },
    /// `{ imported as local }` inside an import.
    ImportSpecifier {
        /// Exported name of the imported binding.
        imported: String,
        /// Local binding name.
        local: String,
    },
    /// `import local from ...`
    ImportDefaultSpecifier {
        /// Local binding name.
        local: String,
    },
    /// `import * as local from ...`
    ImportNamespaceSpecifier {
        /// Local binding name.
        local: String,
    },
    /// `export default <declaration>`
    ExportDefaultDeclaration {
        /// The exported declaration or expression.
        declaration: NodeId,
    },
    /// `export <declaration>`
    ExportNamedDeclaration {
        /// The exported declaration, if any.
        declaration: Option<NodeId>,
    },

    /// `function name(...) { ... }`
    FunctionDeclaration(Function),
    /// `class Name extends Base { ... }`
    ClassDeclaration {
        /// Class name.
        id: Option<NodeId>,
        /// `extends` expression.
        super_class: Option<NodeId>,
        /// Method definitions.
        body: Vec<NodeId>,
    },
    /// A class method; `value` is a function expression.
    MethodDefinition {
        /// Method name.
        key: String,
        /// Method implementation.
        value: NodeId,
    },
    /// `const a = 1, b = 2;`
    VariableDeclaration {
        /// Declaration keyword.
        kind: VarKind,
        /// Declarators in order.
        declarations: Vec<NodeId>,
    },
    /// `id = init` inside a variable declaration.
    VariableDeclarator {
        /// Binding pattern.
        id: NodeId,
        /// Initializer expression.
        init: Option<NodeId>,
    },

    /// `{ ... }`
    BlockStatement {
        /// Statements in order.
        body: Vec<NodeId>,
    },
    /// `expr;`
    ExpressionStatement {
        /// The expression.
        expression: NodeId,
    },
    /// `return expr;`
    ReturnStatement {
        /// Returned expression.
        argument: Option<NodeId>,
    },
    /// `if (test) consequent else alternate`
    IfStatement {
        /// Condition.
        test: NodeId,
        /// Then branch.
        consequent: NodeId,
        /// Else branch.
        alternate: Option<NodeId>,
    },
    /// `try { } catch (e) { } finally { }`
    TryStatement {
        /// Protected block.
        block: NodeId,
        /// Catch clause.
        handler: Option<NodeId>,
        /// Finally block.
        finalizer: Option<NodeId>,
    },
    /// `catch (param) { ... }`
    CatchClause {
        /// Bound error pattern, absent for `catch { }`.
        param: Option<NodeId>,
        /// Handler block.
        body: NodeId,
    },
    /// `throw expr;`
    ThrowStatement {
        /// Thrown expression.
        argument: NodeId,
    },

    /// A binding or reference name, optionally annotated (`name: T`).
    Identifier {
        /// The name.
        name: String,
        /// Type annotation, when written as a binding.
        type_annotation: Option<NodeId>,
    },
    /// `{ a, b: c }` in binding position.
    ObjectPattern {
        /// Property nodes.
        properties: Vec<NodeId>,
        /// Type annotation on the whole pattern.
        type_annotation: Option<NodeId>,
    },
    /// `left = right` in binding position.
    AssignmentPattern {
        /// Target pattern.
        left: NodeId,
        /// Default value.
        right: NodeId,
    },

    /// `function (...) { ... }` in expression position.
    FunctionExpression(Function),
    /// `(...) => body`
    ArrowFunctionExpression(Function),
    /// `callee(args)`
    CallExpression {
        /// Called expression.
        callee: NodeId,
        /// Arguments in order.
        arguments: Vec<NodeId>,
    },
    /// `object.property` or `object[property]`
    MemberExpression {
        /// Base expression.
        object: NodeId,
        /// Accessed property.
        property: NodeId,
        /// `true` for bracket access.
        computed: bool,
    },
    /// `left op right` where `op` is `=`, `+=`, ...
    AssignmentExpression {
        /// Operator text.
        operator: String,
        /// Assigned target.
        left: NodeId,
        /// Assigned value.
        right: NodeId,
    },
    /// `test ? consequent : alternate`
    ConditionalExpression {
        /// Condition.
        test: NodeId,
        /// Value when true.
        consequent: NodeId,
        /// Value when false.
        alternate: NodeId,
    },
    /// Binary and logical operators.
    BinaryExpression {
        /// Operator text.
        operator: String,
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
    },
    /// `!expr`, `-expr`, `typeof expr`, ...
    UnaryExpression {
        /// Operator text.
        operator: String,
        /// Operand.
        argument: NodeId,
    },
    /// `(expr)`
    ParenthesizedExpression {
        /// Inner expression.
        expression: NodeId,
    },
    /// `{ key: value }` in expression position.
    ObjectExpression {
        /// Property nodes.
        properties: Vec<NodeId>,
    },
    /// `key: value` inside an object expression or pattern.
    Property {
        /// Key node (identifier or literal).
        key: NodeId,
        /// Value node; equal to `key` when `shorthand`.
        value: NodeId,
        /// `true` for `{ a }`.
        shorthand: bool,
    },
    /// `[a, b]`
    ArrayExpression {
        /// Elements in order.
        elements: Vec<NodeId>,
    },
    /// String, number, boolean or null literal.
    Literal(Literal),

    /// `<Name ...>children</Name>` or `<Name ... />`
    JsxElement {
        /// Opening tag.
        opening: NodeId,
        /// Child nodes.
        children: Vec<NodeId>,
        /// Closing tag, absent when self-closing.
        closing: Option<NodeId>,
    },
    /// `<Name attr=... >`
    JsxOpeningElement {
        /// Tag name node.
        name: NodeId,
        /// Attributes in order.
        attributes: Vec<NodeId>,
        /// `true` for `<Name />`.
        self_closing: bool,
    },
    /// `</Name>`
    JsxClosingElement {
        /// Tag name node.
        name: NodeId,
    },
    /// `<>children</>`
    JsxFragment {
        /// Child nodes.
        children: Vec<NodeId>,
    },
    /// A tag or attribute name segment.
    JsxIdentifier {
        /// The name.
        name: String,
    },
    /// `Object.Property` in tag position.
    JsxMemberExpression {
        /// Base.
        object: NodeId,
        /// Property segment.
        property: NodeId,
    },
    /// `name`, `name="value"` or `name={expr}`
    JsxAttribute {
        /// Attribute name node.
        name: NodeId,
        /// Value node (string literal, expression container or element).
        value: Option<NodeId>,
    },
    /// `{...expr}` in attribute position.
    JsxSpreadAttribute {
        /// Spread expression.
        argument: NodeId,
    },
    /// `{expr}`; `expression` is `None` for `{}`.
    JsxExpressionContainer {
        /// Embedded expression.
        expression: Option<NodeId>,
    },
    /// Raw text between tags.
    JsxText {
        /// The text.
        value: String,
    },

    /// `boolean`, `string`, ...
    TsKeyword(TsKeyword),
    /// `Name`, `A.B`, `Name<Args>`
    TsTypeReference {
        /// Qualified name segments.
        name: Vec<String>,
        /// Type arguments.
        type_arguments: Vec<NodeId>,
    },
    /// `A | B`
    TsUnionType {
        /// Members.
        types: Vec<NodeId>,
    },
    /// `A & B`
    TsIntersectionType {
        /// Members.
        types: Vec<NodeId>,
    },
    /// `{ a: T; b?: U }`
    TsTypeLiteral {
        /// Property signatures.
        members: Vec<NodeId>,
    },
    /// `key: T` inside a type literal.
    TsPropertySignature {
        /// Property name.
        key: String,
        /// Declared type.
        annotation: Option<NodeId>,
        /// `true` for `key?: T`.
        optional: bool,
    },
}

macro_rules! node_tags {
    ($($tag:ident),* $(,)?) => {
        /// Fieldless discriminant of [`NodeKind`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum NodeTag {
            $(
                #[allow(missing_docs)]
                $tag,
            )*
        }

        impl NodeTag {
            /// Every tag, in declaration order.
            pub const ALL: &'static [NodeTag] = &[$(NodeTag::$tag),*];

            /// Number of distinct tags.
            pub const COUNT: usize = Self::ALL.len();

            /// Dense index of this tag, for tag-indexed tables.
            pub fn index(self) -> usize {
                self as usize
            }
        }
    };
}

node_tags!(
    Program,
    ImportDeclaration,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ExportDefaultDeclaration,
    ExportNamedDeclaration,
    FunctionDeclaration,
    ClassDeclaration,
    MethodDefinition,
    VariableDeclaration,
    VariableDeclarator,
    BlockStatement,
    ExpressionStatement,
    ReturnStatement,
    IfStatement,
    TryStatement,
    CatchClause,
    ThrowStatement,
    Identifier,
    ObjectPattern,
    AssignmentPattern,
    FunctionExpression,
    ArrowFunctionExpression,
    CallExpression,
    MemberExpression,
    AssignmentExpression,
    ConditionalExpression,
    BinaryExpression,
    UnaryExpression,
    ParenthesizedExpression,
    ObjectExpression,
    Property,
    ArrayExpression,
    Literal,
    JsxElement,
    JsxOpeningElement,
    JsxClosingElement,
    JsxFragment,
    JsxIdentifier,
    JsxMemberExpression,
    JsxAttribute,
    JsxSpreadAttribute,
    JsxExpressionContainer,
    JsxText,
    TsKeyword,
    TsTypeReference,
    TsUnionType,
    TsIntersectionType,
    TsTypeLiteral,
    TsPropertySignature,
);

impl NodeKind {
    /// Returns the discriminant tag.
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Program { .. } => NodeTag::Program,
            NodeKind::ImportDeclaration { .. } => NodeTag::ImportDeclaration,
            NodeKind::ImportSpecifier { .. } => NodeTag::ImportSpecifier,
            NodeKind::ImportDefaultSpecifier { .. } => NodeTag::ImportDefaultSpecifier,
            NodeKind::ImportNamespaceSpecifier { .. } => NodeTag::ImportNamespaceSpecifier,
            NodeKind::ExportDefaultDeclaration { .. } => NodeTag::ExportDefaultDeclaration,
            NodeKind::ExportNamedDeclaration { .. } => NodeTag::ExportNamedDeclaration,
            NodeKind::FunctionDeclaration(_) => NodeTag::FunctionDeclaration,
            NodeKind::ClassDeclaration { .. } => NodeTag::ClassDeclaration,
            NodeKind::MethodDefinition { .. } => NodeTag::MethodDefinition,
            NodeKind::VariableDeclaration { .. } => NodeTag::VariableDeclaration,
            NodeKind::VariableDeclarator { .. } => NodeTag::VariableDeclarator,
            NodeKind::BlockStatement { .. } => NodeTag::BlockStatement,
            NodeKind::ExpressionStatement { .. } => NodeTag::ExpressionStatement,
            NodeKind::ReturnStatement { .. } => NodeTag::ReturnStatement,
            NodeKind::IfStatement { .. } => NodeTag::IfStatement,
            NodeKind::TryStatement { .. } => NodeTag::TryStatement,
            NodeKind::CatchClause { .. } => NodeTag::CatchClause,
            NodeKind::ThrowStatement { .. } => NodeTag::ThrowStatement,
            NodeKind::Identifier { .. } => NodeTag::Identifier,
            NodeKind::ObjectPattern { .. } => NodeTag::ObjectPattern,
            NodeKind::AssignmentPattern { .. } => NodeTag::AssignmentPattern,
            NodeKind::FunctionExpression(_) => NodeTag::FunctionExpression,
            NodeKind::ArrowFunctionExpression(_) => NodeTag::ArrowFunctionExpression,
            NodeKind::CallExpression { .. } => NodeTag::CallExpression,
            NodeKind::MemberExpression { .. } => NodeTag::MemberExpression,
            NodeKind::AssignmentExpression { .. } => NodeTag::AssignmentExpression,
            NodeKind::ConditionalExpression { .. } => NodeTag::ConditionalExpression,
            NodeKind::BinaryExpression { .. } => NodeTag::BinaryExpression,
            NodeKind::UnaryExpression { .. } => NodeTag::UnaryExpression,
            NodeKind::ParenthesizedExpression { .. } => NodeTag::ParenthesizedExpression,
            NodeKind::ObjectExpression { .. } => NodeTag::ObjectExpression,
            NodeKind::Property { .. } => NodeTag::Property,
            NodeKind::ArrayExpression { .. } => NodeTag::ArrayExpression,
            NodeKind::Literal(_) => NodeTag::Literal,
            NodeKind::JsxElement { .. } => NodeTag::JsxElement,
            NodeKind::JsxOpeningElement { .. } => NodeTag::JsxOpeningElement,
            NodeKind::JsxClosingElement { .. } => NodeTag::JsxClosingElement,
            NodeKind::JsxFragment { .. } => NodeTag::JsxFragment,
            NodeKind::JsxIdentifier { .. } => NodeTag::JsxIdentifier,
            NodeKind::JsxMemberExpression { .. } => NodeTag::JsxMemberExpression,
            NodeKind::JsxAttribute { .. } => NodeTag::JsxAttribute,
            NodeKind::JsxSpreadAttribute { .. } => NodeTag::JsxSpreadAttribute,
            NodeKind::JsxExpressionContainer { .. } => NodeTag::JsxExpressionContainer,
            NodeKind::JsxText { .. } => NodeTag::JsxText,
            NodeKind::TsKeyword(_) => NodeTag::TsKeyword,
            NodeKind::TsTypeReference { .. } => NodeTag::TsTypeReference,
            NodeKind::TsUnionType { .. } => NodeTag::TsUnionType,
            NodeKind::TsIntersectionType { .. } => NodeTag::TsIntersectionType,
            NodeKind::TsTypeLiteral { .. } => NodeTag::TsTypeLiteral,
            NodeKind::TsPropertySignature { .. } => NodeTag::TsPropertySignature,
        }
    }

    /// Returns the function payload of declarations, expressions and arrows.
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            NodeKind::FunctionDeclaration(f)
            | NodeKind::FunctionExpression(f)
            | NodeKind::ArrowFunctionExpression(f) => Some(f),
            _ => None,
        }
    }

    /// Returns `true` for any function-like node.
    pub fn is_function(&self) -> bool {
        self.as_function().is_some()
    }

    /// Returns the direct children in source order.
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        match self {
            NodeKind::Program { body } | NodeKind::BlockStatement { body } => {
                out.extend(body)
            }
            NodeKind::ImportDeclaration { specifiers, .. } => out.extend(specifiers),
            NodeKind::ExportDefaultDeclaration { declaration } => out.push(*declaration),
            NodeKind::ExportNamedDeclaration { declaration } => out.extend(declaration),
            NodeKind::FunctionDeclaration(f)
            | NodeKind::FunctionExpression(f)
            | NodeKind::ArrowFunctionExpression(f) => {
                out.extend(f.id);
                out.extend(&f.params);
                out.extend(f.return_type);
                out.push(f.body);
            }
            NodeKind::ClassDeclaration {
                id,
                super_class,
                body,
            } => {
                out.extend(id);
                out.extend(super_class);
                out.extend(body);
            }
            NodeKind::MethodDefinition { value, .. } => out.push(*value),
            NodeKind::VariableDeclaration { declarations, .. } => out.extend(declarations),
            NodeKind::VariableDeclarator { id, init } => {
                out.push(*id);
                out.extend(init);
            }
            NodeKind::ExpressionStatement { expression } => out.push(*expression),
            NodeKind::ReturnStatement { argument } => out.extend(argument),
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                out.push(*test);
                out.push(*consequent);
                out.extend(alternate);
            }
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                out.push(*block);
                out.extend(handler);
                out.extend(finalizer);
            }
            NodeKind::CatchClause { param, body } => {
                out.extend(param);
                out.push(*body);
            }
            NodeKind::ThrowStatement { argument } => out.push(*argument),
            NodeKind::Identifier {
                type_annotation, ..
            } => out.extend(type_annotation),
            NodeKind::ObjectPattern {
                properties,
                type_annotation,
            } => {
                out.extend(properties);
                out.extend(type_annotation);
            }
            NodeKind::AssignmentPattern { left, right } => {
                out.push(*left);
                out.push(*right);
            }
            NodeKind::CallExpression { callee, arguments } => {
                out.push(*callee);
                out.extend(arguments);
            }
            NodeKind::MemberExpression {
                object, property, ..
            } => {
                out.push(*object);
                out.push(*property);
            }
            NodeKind::AssignmentExpression { left, right, .. }
            | NodeKind::BinaryExpression { left, right, .. } => {
                out.push(*left);
                out.push(*right);
            }
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                out.push(*test);
                out.push(*consequent);
                out.push(*alternate);
            }
            NodeKind::UnaryExpression { argument, .. } => out.push(*argument),
            NodeKind::ParenthesizedExpression { expression } => out.push(*expression),
            NodeKind::ObjectExpression { properties } => out.extend(properties),
            NodeKind::Property {
                key,
                value,
                shorthand,
            } => {
                out.push(*key);
                if !shorthand {
                    out.push(*value);
                }
            }
            NodeKind::ArrayExpression { elements } => out.extend(elements),
            NodeKind::JsxElement {
                opening,
                children,
                closing,
            } => {
                out.push(*opening);
                out.extend(children);
                out.extend(closing);
            }
            NodeKind::JsxOpeningElement {
                name, attributes, ..
            } => {
                out.push(*name);
                out.extend(attributes);
            }
            NodeKind::JsxClosingElement { name } => out.push(*name),
            NodeKind::JsxFragment { children } => out.extend(children),
            NodeKind::JsxMemberExpression { object, property } => {
                out.push(*object);
                out.push(*property);
            }
            NodeKind::JsxAttribute { name, value } => {
                out.push(*name);
                out.extend(value);
            }
            NodeKind::JsxSpreadAttribute { argument } => out.push(*argument),
            NodeKind::JsxExpressionContainer { expression } => out.extend(expression),
            NodeKind::TsTypeReference { type_arguments, .. } => out.extend(type_arguments),
            NodeKind::TsUnionType { types } | NodeKind::TsIntersectionType { types } => {
                out.extend(types)
            }
            NodeKind::TsTypeLiteral { members } => out.extend(members),
            NodeKind::TsPropertySignature { annotation, .. } => out.extend(annotation),
            NodeKind::ImportSpecifier { .. }
            | NodeKind::ImportDefaultSpecifier { .. }
            | NodeKind::ImportNamespaceSpecifier { .. }
            | NodeKind::Literal(_)
            | NodeKind::JsxIdentifier { .. }
            | NodeKind::JsxText { .. }
            | NodeKind::TsKeyword(_) => {}
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_dense() {
        for (i, tag) in NodeTag::ALL.iter().enumerate() {
            assert_eq!(tag.index(), i);
        }
        assert_eq!(NodeTag::COUNT, NodeTag::ALL.len());
    }

    #[test]
    fn kind_reports_tag() {
        let kind = NodeKind::JsxText {
            value: "hi".to_string(),
        };
        assert_eq!(kind.tag(), NodeTag::JsxText);
        assert!(kind.children().is_empty());
    }

    #[test]
    fn shorthand_property_lists_key_once() {
        let key = NodeId::from_raw(4);
        let kind = NodeKind::Property {
            key,
            value: key,
            shorthand: true,
        };
        assert_eq!(kind.children(), vec![key]);
    }

    #[test]
    fn function_children_in_source_order() {
        let f = Function {
            id: Some(NodeId::from_raw(1)),
            params: vec![NodeId::from_raw(2), NodeId::from_raw(3)],
            return_type: None,
            body: NodeId::from_raw(4),
            is_async: false,
        };
        let kind = NodeKind::FunctionDeclaration(f);
        let raw: Vec<u32> = kind.children().iter().map(|c| c.as_raw()).collect();
        assert_eq!(raw, vec![1, 2, 3, 4]);
        assert!(kind.is_function());
    }

    #[test]
    fn literal_string_accessor() {
        let lit = Literal {
            value: LiteralValue::String("red".to_string()),
            raw: "\"red\"".to_string(),
        };
        assert_eq!(lit.as_str(), Some("red"));
        let num = Literal {
            value: LiteralValue::Number(1.0),
            raw: "1".to_string(),
        };
        assert_eq!(num.as_str(), None);
    }

    #[test]
    fn nodes_survive_a_json_round_trip() {
        use crate::builder::TreeBuilder;

        // const ok: boolean = true; <svg fill="#000" />;
        let mut b = TreeBuilder::new("src/icons/Dot.tsx");
        let ann = b.ts_keyword(TsKeyword::Boolean);
        let ok = b.typed_ident("ok", ann);
        let yes = b.boolean(true);
        let decl = b.const_decl(ok, yes);
        let fill = b.jsx_attr_str("fill", "#000");
        let svg = b.element("svg", &[fill], &[]);
        let stmt = b.expr_stmt(svg);
        let program = b.program(&[decl, stmt]);
        let built = b.finish(program);

        for id in built.tree.walk() {
            let node = built.tree.node(id);
            let json = serde_json::to_string(node).unwrap();
            let back: Node = serde_json::from_str(&json).unwrap();
            assert_eq!(back.kind.tag(), node.kind.tag());
            assert_eq!(back.kind.children(), node.kind.children());
            assert_eq!(back.span, node.span);
            assert_eq!(back.parent, node.parent);
            assert_eq!(serde_json::to_string(&back).unwrap(), json);
        }

        let json = serde_json::to_value(built.tree.node(ok)).unwrap();
        assert_eq!(json["kind"]["Identifier"]["name"], "ok");
    }
}
