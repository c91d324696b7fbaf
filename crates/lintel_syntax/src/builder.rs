//! Bottom-up tree construction with synthesized source text.
//!
//! Every node is built from [`Part`]s: literal text and previously built
//! children. The builder records where each child lands inside its parent's
//! text, so once the root is finished every span indexes exactly into the
//! produced buffer. Formatting is fixed and compact (`{ a: 1 }`, `<svg />`,
//! statements separated by a single space inside blocks and by newlines at the
//! top level).

use crate::arena::Arena;
use crate::ids::NodeId;
use crate::node::{Function, Literal, LiteralValue, Node, NodeKind, TsKeyword, VarKind};
use crate::tree::SyntaxTree;
use lintel_source::{FileId, SourceFile, Span};
use std::path::PathBuf;

/// A piece of a node's source text.
#[derive(Debug, Clone, Copy)]
pub enum Part<'a> {
    /// Literal text owned by the node itself.
    Text(&'a str),
    /// The full text of a previously built child.
    Child(NodeId),
}

/// The result of [`TreeBuilder::finish`].
pub struct BuiltTree {
    /// The linked tree.
    pub tree: SyntaxTree,
    /// The synthesized buffer every span indexes into.
    pub source: SourceFile,
}

struct Pending {
    kind: NodeKind,
    text: String,
    placements: Vec<(NodeId, u32)>,
}

/// Builds a [`SyntaxTree`] and its source text together.
pub struct TreeBuilder {
    file: FileId,
    path: PathBuf,
    pending: Vec<Pending>,
}

impl TreeBuilder {
    /// Creates a builder for a buffer that will be reported under `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_file(FileId::from_raw(0), path)
    }

    /// Creates a builder whose spans carry the given `FileId`.
    pub fn with_file(file: FileId, path: impl Into<PathBuf>) -> Self {
        Self {
            file,
            path: path.into(),
            pending: Vec::new(),
        }
    }

    /// Builds a node of `kind` whose text is the concatenation of `parts`.
    pub fn node(&mut self, kind: NodeKind, parts: &[Part<'_>]) -> NodeId {
        let mut text = String::new();
        let mut placements = Vec::new();
        for part in parts {
            match *part {
                Part::Text(t) => text.push_str(t),
                Part::Child(child) => {
                    placements.push((child, text.len() as u32));
                    text.push_str(&self.pending[child.as_raw() as usize].text);
                }
            }
        }
        let id = NodeId::from_raw(self.pending.len() as u32);
        self.pending.push(Pending {
            kind,
            text,
            placements,
        });
        id
    }

    /// Returns the text built so far for `id`.
    pub fn text_of(&self, id: NodeId) -> &str {
        &self.pending[id.as_raw() as usize].text
    }

    /// Lays out the tree rooted at `root` and links parents.
    ///
    /// Nodes not reachable from `root` keep a zero-based span of their own length.
    pub fn finish(self, root: NodeId) -> BuiltTree {
        let mut starts = vec![0u32; self.pending.len()];
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let base = starts[id.as_raw() as usize];
            for &(child, rel) in &self.pending[id.as_raw() as usize].placements {
                starts[child.as_raw() as usize] = base + rel;
                stack.push(child);
            }
        }

        let content = self.pending[root.as_raw() as usize].text.clone();
        let mut nodes: Arena<NodeId, Node> = Arena::new();
        for (i, pending) in self.pending.into_iter().enumerate() {
            let start = starts[i];
            nodes.alloc(Node {
                kind: pending.kind,
                span: Span::new(self.file, start, start + pending.text.len() as u32),
                parent: None,
            });
        }

        BuiltTree {
            tree: SyntaxTree::new(self.file, nodes, root),
            source: SourceFile::new(self.file, self.path, content),
        }
    }

    fn joined(&mut self, kind: NodeKind, open: &str, items: &[NodeId], sep: &str, close: &str) -> NodeId {
        let mut parts = vec![Part::Text(open)];
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                parts.push(Part::Text(sep));
            }
            parts.push(Part::Child(*item));
        }
        parts.push(Part::Text(close));
        self.node(kind, &parts)
    }

    fn kind_of(&self, id: NodeId) -> &NodeKind {
        &self.pending[id.as_raw() as usize].kind
    }

    // ---- names and literals -------------------------------------------------

    /// `name`
    pub fn ident(&mut self, name: &str) -> NodeId {
        self.node(
            NodeKind::Identifier {
                name: name.to_string(),
                type_annotation: None,
            },
            &[Part::Text(name)],
        )
    }

    /// `name: annotation`
    pub fn typed_ident(&mut self, name: &str, annotation: NodeId) -> NodeId {
        self.node(
            NodeKind::Identifier {
                name: name.to_string(),
                type_annotation: Some(annotation),
            },
            &[Part::Text(name), Part::Text(": "), Part::Child(annotation)],
        )
    }

    /// `"value"`
    pub fn string(&mut self, value: &str) -> NodeId {
        let raw = format!("\"{value}\"");
        self.literal(LiteralValue::String(value.to_string()), raw)
    }

    /// A numeric literal.
    pub fn number(&mut self, value: f64) -> NodeId {
        let raw = if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{}", value as i64)
        } else {
            value.to_string()
        };
        self.literal(LiteralValue::Number(value), raw)
    }

    /// `true` / `false`
    pub fn boolean(&mut self, value: bool) -> NodeId {
        self.literal(LiteralValue::Boolean(value), value.to_string())
    }

    /// `null`
    pub fn null(&mut self) -> NodeId {
        self.literal(LiteralValue::Null, "null".to_string())
    }

    fn literal(&mut self, value: LiteralValue, raw: String) -> NodeId {
        let text = raw.clone();
        self.node(
            NodeKind::Literal(Literal { value, raw }),
            &[Part::Text(&text)],
        )
    }

    // ---- types --------------------------------------------------------------

    /// `boolean`, `string`, ...
    pub fn ts_keyword(&mut self, keyword: TsKeyword) -> NodeId {
        self.node(NodeKind::TsKeyword(keyword), &[Part::Text(keyword.keyword())])
    }

    /// `A.B.C`
    pub fn ts_ref(&mut self, path: &str) -> NodeId {
        self.ts_ref_args(path, &[])
    }

    /// `Name<Arg, ...>`
    pub fn ts_ref_args(&mut self, path: &str, args: &[NodeId]) -> NodeId {
        let kind = NodeKind::TsTypeReference {
            name: path.split('.').map(str::to_string).collect(),
            type_arguments: args.to_vec(),
        };
        if args.is_empty() {
            self.node(kind, &[Part::Text(path)])
        } else {
            let open = format!("{path}<");
            self.joined(kind, &open, args, ", ", ">")
        }
    }

    /// `A | B`
    pub fn ts_union(&mut self, types: &[NodeId]) -> NodeId {
        let kind = NodeKind::TsUnionType {
            types: types.to_vec(),
        };
        self.joined(kind, "", types, " | ", "")
    }

    /// `A & B`
    pub fn ts_intersection(&mut self, types: &[NodeId]) -> NodeId {
        let kind = NodeKind::TsIntersectionType {
            types: types.to_vec(),
        };
        self.joined(kind, "", types, " & ", "")
    }

    /// `key: T` or `key?: T`
    pub fn ts_prop(&mut self, key: &str, annotation: NodeId, optional: bool) -> NodeId {
        let head = if optional {
            format!("{key}?: ")
        } else {
            format!("{key}: ")
        };
        self.node(
            NodeKind::TsPropertySignature {
                key: key.to_string(),
                annotation: Some(annotation),
                optional,
            },
            &[Part::Text(&head), Part::Child(annotation)],
        )
    }

    /// `{ a: T; b: U }`
    pub fn ts_type_literal(&mut self, members: &[NodeId]) -> NodeId {
        let kind = NodeKind::TsTypeLiteral {
            members: members.to_vec(),
        };
        if members.is_empty() {
            return self.node(kind, &[Part::Text("{}")]);
        }
        self.joined(kind, "{ ", members, "; ", " }")
    }

    // ---- patterns -----------------------------------------------------------

    /// `{ a, b }` or `{ a, b }: T`
    pub fn object_pattern(&mut self, properties: &[NodeId], annotation: Option<NodeId>) -> NodeId {
        let kind = NodeKind::ObjectPattern {
            properties: properties.to_vec(),
            type_annotation: annotation,
        };
        let mut parts = vec![Part::Text("{ ")];
        for (i, p) in properties.iter().enumerate() {
            if i > 0 {
                parts.push(Part::Text(", "));
            }
            parts.push(Part::Child(*p));
        }
        parts.push(Part::Text(" }"));
        if let Some(ann) = annotation {
            parts.push(Part::Text(": "));
            parts.push(Part::Child(ann));
        }
        self.node(kind, &parts)
    }

    /// Shorthand property `name` (pattern or object expression).
    pub fn shorthand_prop(&mut self, name: &str) -> NodeId {
        let key = self.ident(name);
        self.node(
            NodeKind::Property {
                key,
                value: key,
                shorthand: true,
            },
            &[Part::Child(key)],
        )
    }

    /// `key: value`
    pub fn prop(&mut self, key: &str, value: NodeId) -> NodeId {
        let key = self.ident(key);
        self.node(
            NodeKind::Property {
                key,
                value,
                shorthand: false,
            },
            &[Part::Child(key), Part::Text(": "), Part::Child(value)],
        )
    }

    /// `left = right` in binding position.
    pub fn assign_pattern(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.node(
            NodeKind::AssignmentPattern { left, right },
            &[Part::Child(left), Part::Text(" = "), Part::Child(right)],
        )
    }

    // ---- expressions --------------------------------------------------------

    /// `callee(args)`
    pub fn call(&mut self, callee: NodeId, arguments: &[NodeId]) -> NodeId {
        let kind = NodeKind::CallExpression {
            callee,
            arguments: arguments.to_vec(),
        };
        let mut parts = vec![Part::Child(callee), Part::Text("(")];
        for (i, a) in arguments.iter().enumerate() {
            if i > 0 {
                parts.push(Part::Text(", "));
            }
            parts.push(Part::Child(*a));
        }
        parts.push(Part::Text(")"));
        self.node(kind, &parts)
    }

    /// `object.property`
    pub fn member(&mut self, object: NodeId, property: &str) -> NodeId {
        let property = self.ident(property);
        self.node(
            NodeKind::MemberExpression {
                object,
                property,
                computed: false,
            },
            &[Part::Child(object), Part::Text("."), Part::Child(property)],
        )
    }

    /// `a.b.c` as nested member expressions.
    pub fn path(&mut self, dotted: &str) -> NodeId {
        let mut segments = dotted.split('.');
        let first = segments.next().unwrap_or_default();
        let mut expr = self.ident(first);
        for seg in segments {
            expr = self.member(expr, seg);
        }
        expr
    }

    /// `left op right`
    pub fn binary(&mut self, left: NodeId, operator: &str, right: NodeId) -> NodeId {
        let op = format!(" {operator} ");
        self.node(
            NodeKind::BinaryExpression {
                operator: operator.to_string(),
                left,
                right,
            },
            &[Part::Child(left), Part::Text(&op), Part::Child(right)],
        )
    }

    /// `!x`, `-x`, `typeof x`
    pub fn unary(&mut self, operator: &str, argument: NodeId) -> NodeId {
        let op = if operator.chars().all(char::is_alphabetic) {
            format!("{operator} ")
        } else {
            operator.to_string()
        };
        self.node(
            NodeKind::UnaryExpression {
                operator: operator.to_string(),
                argument,
            },
            &[Part::Text(&op), Part::Child(argument)],
        )
    }

    /// `left = right` (or another assignment operator).
    pub fn assign(&mut self, left: NodeId, operator: &str, right: NodeId) -> NodeId {
        let op = format!(" {operator} ");
        self.node(
            NodeKind::AssignmentExpression {
                operator: operator.to_string(),
                left,
                right,
            },
            &[Part::Child(left), Part::Text(&op), Part::Child(right)],
        )
    }

    /// `test ? consequent : alternate`
    pub fn cond(&mut self, test: NodeId, consequent: NodeId, alternate: NodeId) -> NodeId {
        self.node(
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            },
            &[
                Part::Child(test),
                Part::Text(" ? "),
                Part::Child(consequent),
                Part::Text(" : "),
                Part::Child(alternate),
            ],
        )
    }

    /// `(expression)`
    pub fn paren(&mut self, expression: NodeId) -> NodeId {
        self.node(
            NodeKind::ParenthesizedExpression { expression },
            &[Part::Text("("), Part::Child(expression), Part::Text(")")],
        )
    }

    /// `{ a: 1, b }`
    pub fn object(&mut self, properties: &[NodeId]) -> NodeId {
        let kind = NodeKind::ObjectExpression {
            properties: properties.to_vec(),
        };
        if properties.is_empty() {
            return self.node(kind, &[Part::Text("{}")]);
        }
        self.joined(kind, "{ ", properties, ", ", " }")
    }

    /// `[a, b]`
    pub fn array(&mut self, elements: &[NodeId]) -> NodeId {
        let kind = NodeKind::ArrayExpression {
            elements: elements.to_vec(),
        };
        self.joined(kind, "[", elements, ", ", "]")
    }

    /// `(params) => body`; a block body or a concise expression body.
    pub fn arrow(&mut self, params: &[NodeId], body: NodeId) -> NodeId {
        let kind = NodeKind::ArrowFunctionExpression(Function {
            id: None,
            params: params.to_vec(),
            return_type: None,
            body,
            is_async: false,
        });
        let mut parts = self.param_parts(params);
        parts.push(Part::Text(" => "));
        parts.push(Part::Child(body));
        self.node(kind, &parts)
    }

    /// `function name(params) { ... }` in expression position.
    pub fn fn_expr(&mut self, name: Option<&str>, params: &[NodeId], body: NodeId) -> NodeId {
        let id = name.map(|n| self.ident(n));
        let kind = NodeKind::FunctionExpression(Function {
            id,
            params: params.to_vec(),
            return_type: None,
            body,
            is_async: false,
        });
        let mut parts = vec![Part::Text("function")];
        if let Some(id) = id {
            parts.push(Part::Text(" "));
            parts.push(Part::Child(id));
        }
        parts.extend(self.param_parts(params));
        parts.push(Part::Text(" "));
        parts.push(Part::Child(body));
        self.node(kind, &parts)
    }

    fn param_parts(&self, params: &[NodeId]) -> Vec<Part<'static>> {
        let mut parts = vec![Part::Text("(")];
        for (i, p) in params.iter().enumerate() {
            if i > 0 {
                parts.push(Part::Text(", "));
            }
            parts.push(Part::Child(*p));
        }
        parts.push(Part::Text(")"));
        parts
    }

    // ---- statements ---------------------------------------------------------

    /// `expression;`
    pub fn expr_stmt(&mut self, expression: NodeId) -> NodeId {
        self.node(
            NodeKind::ExpressionStatement { expression },
            &[Part::Child(expression), Part::Text(";")],
        )
    }

    /// `return argument;`
    pub fn ret(&mut self, argument: Option<NodeId>) -> NodeId {
        match argument {
            Some(arg) => self.node(
                NodeKind::ReturnStatement {
                    argument: Some(arg),
                },
                &[Part::Text("return "), Part::Child(arg), Part::Text(";")],
            ),
            None => self.node(
                NodeKind::ReturnStatement { argument: None },
                &[Part::Text("return;")],
            ),
        }
    }

    /// `{ stmt stmt }`
    pub fn block(&mut self, body: &[NodeId]) -> NodeId {
        let kind = NodeKind::BlockStatement {
            body: body.to_vec(),
        };
        if body.is_empty() {
            return self.node(kind, &[Part::Text("{}")]);
        }
        self.joined(kind, "{ ", body, " ", " }")
    }

    /// `{ return argument; }`
    pub fn returning(&mut self, argument: NodeId) -> NodeId {
        let ret = self.ret(Some(argument));
        self.block(&[ret])
    }

    /// `id = init` or `id`
    pub fn declarator(&mut self, id: NodeId, init: Option<NodeId>) -> NodeId {
        match init {
            Some(init) => self.node(
                NodeKind::VariableDeclarator {
                    id,
                    init: Some(init),
                },
                &[Part::Child(id), Part::Text(" = "), Part::Child(init)],
            ),
            None => self.node(
                NodeKind::VariableDeclarator { id, init: None },
                &[Part::Child(id)],
            ),
        }
    }

    /// `kind a = 1, b = 2;`
    pub fn var_decl(&mut self, kind: VarKind, declarations: &[NodeId]) -> NodeId {
        let open = format!("{} ", kind.keyword());
        let node_kind = NodeKind::VariableDeclaration {
            kind,
            declarations: declarations.to_vec(),
        };
        self.joined(node_kind, &open, declarations, ", ", ";")
    }

    /// `const id = init;`
    pub fn const_decl(&mut self, id: NodeId, init: NodeId) -> NodeId {
        let d = self.declarator(id, Some(init));
        self.var_decl(VarKind::Const, &[d])
    }

    /// `if (test) consequent else alternate`
    pub fn if_stmt(&mut self, test: NodeId, consequent: NodeId, alternate: Option<NodeId>) -> NodeId {
        let mut parts = vec![
            Part::Text("if ("),
            Part::Child(test),
            Part::Text(") "),
            Part::Child(consequent),
        ];
        if let Some(alt) = alternate {
            parts.push(Part::Text(" else "));
            parts.push(Part::Child(alt));
        }
        self.node(
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            },
            &parts,
        )
    }

    /// `catch (param) body` / `catch body`
    pub fn catch_clause(&mut self, param: Option<NodeId>, body: NodeId) -> NodeId {
        let kind = NodeKind::CatchClause { param, body };
        match param {
            Some(p) => self.node(
                kind,
                &[
                    Part::Text("catch ("),
                    Part::Child(p),
                    Part::Text(") "),
                    Part::Child(body),
                ],
            ),
            None => self.node(kind, &[Part::Text("catch "), Part::Child(body)]),
        }
    }

    /// `try block handler finally finalizer`
    pub fn try_stmt(&mut self, block: NodeId, handler: Option<NodeId>, finalizer: Option<NodeId>) -> NodeId {
        let mut parts = vec![Part::Text("try "), Part::Child(block)];
        if let Some(h) = handler {
            parts.push(Part::Text(" "));
            parts.push(Part::Child(h));
        }
        if let Some(f) = finalizer {
            parts.push(Part::Text(" finally "));
            parts.push(Part::Child(f));
        }
        self.node(
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            },
            &parts,
        )
    }

    /// `throw argument;`
    pub fn throw(&mut self, argument: NodeId) -> NodeId {
        self.node(
            NodeKind::ThrowStatement { argument },
            &[Part::Text("throw "), Part::Child(argument), Part::Text(";")],
        )
    }

    /// `function name(params) body`
    pub fn function_decl(&mut self, name: &str, params: &[NodeId], body: NodeId) -> NodeId {
        let id = self.ident(name);
        let kind = NodeKind::FunctionDeclaration(Function {
            id: Some(id),
            params: params.to_vec(),
            return_type: None,
            body,
            is_async: false,
        });
        let mut parts = vec![Part::Text("function "), Part::Child(id)];
        parts.extend(self.param_parts(params));
        parts.push(Part::Text(" "));
        parts.push(Part::Child(body));
        self.node(kind, &parts)
    }

    /// `class Name extends Base { methods }`
    pub fn class_decl(&mut self, name: &str, super_class: Option<NodeId>, methods: &[NodeId]) -> NodeId {
        let id = self.ident(name);
        let mut parts = vec![Part::Text("class "), Part::Child(id)];
        if let Some(sc) = super_class {
            parts.push(Part::Text(" extends "));
            parts.push(Part::Child(sc));
        }
        if methods.is_empty() {
            parts.push(Part::Text(" {}"));
        } else {
            parts.push(Part::Text(" { "));
            for (i, m) in methods.iter().enumerate() {
                if i > 0 {
                    parts.push(Part::Text(" "));
                }
                parts.push(Part::Child(*m));
            }
            parts.push(Part::Text(" }"));
        }
        self.node(
            NodeKind::ClassDeclaration {
                id: Some(id),
                super_class,
                body: methods.to_vec(),
            },
            &parts,
        )
    }

    /// `key(params) body` inside a class body.
    pub fn method(&mut self, key: &str, params: &[NodeId], body: NodeId) -> NodeId {
        let mut fparts = self.param_parts(params);
        fparts.push(Part::Text(" "));
        fparts.push(Part::Child(body));
        let value = self.node(
            NodeKind::FunctionExpression(Function {
                id: None,
                params: params.to_vec(),
                return_type: None,
                body,
                is_async: false,
            }),
            &fparts,
        );
        self.node(
            NodeKind::MethodDefinition {
                key: key.to_string(),
                value,
            },
            &[Part::Text(key), Part::Child(value)],
        )
    }

    // ---- modules ------------------------------------------------------------

    /// `import Default, * as Ns, { a, b } from "source";`
    ///
    /// A namespace import and a named list are mutually exclusive in real
    /// code; if both are given the named list is dropped.
    pub fn import(
        &mut self,
        source: &str,
        default: Option<&str>,
        namespace: Option<&str>,
        named: &[&str],
    ) -> NodeId {
        let mut specifiers = Vec::new();
        let mut parts: Vec<Part<'_>> = vec![Part::Text("import ")];
        let mut clauses = 0;

        if let Some(local) = default {
            let s = self.node(
                NodeKind::ImportDefaultSpecifier {
                    local: local.to_string(),
                },
                &[Part::Text(local)],
            );
            specifiers.push(s);
            parts.push(Part::Child(s));
            clauses += 1;
        }
        if let Some(local) = namespace {
            let text = format!("* as {local}");
            let s = self.node(
                NodeKind::ImportNamespaceSpecifier {
                    local: local.to_string(),
                },
                &[Part::Text(&text)],
            );
            if clauses > 0 {
                parts.push(Part::Text(", "));
            }
            specifiers.push(s);
            parts.push(Part::Child(s));
            clauses += 1;
        } else if !named.is_empty() {
            if clauses > 0 {
                parts.push(Part::Text(", "));
            }
            parts.push(Part::Text("{ "));
            for (i, name) in named.iter().enumerate() {
                let s = self.node(
                    NodeKind::ImportSpecifier {
                        imported: name.to_string(),
                        local: name.to_string(),
                    },
                    &[Part::Text(name)],
                );
                if i > 0 {
                    parts.push(Part::Text(", "));
                }
                specifiers.push(s);
                parts.push(Part::Child(s));
            }
            parts.push(Part::Text(" }"));
            clauses += 1;
        }

        let tail = format!("\"{source}\";");
        if clauses > 0 {
            parts.push(Part::Text(" from "));
        }
        parts.push(Part::Text(&tail));
        self.node(
            NodeKind::ImportDeclaration {
                source: source.to_string(),
                specifiers,
                type_only: false,
            },
            &parts,
        )
    }

    /// `export default declaration` (with `;` after expressions).
    pub fn export_default(&mut self, declaration: NodeId) -> NodeId {
        let is_decl = matches!(
            self.kind_of(declaration),
            NodeKind::FunctionDeclaration(_) | NodeKind::ClassDeclaration { .. }
        );
        let close = if is_decl { "" } else { ";" };
        self.node(
            NodeKind::ExportDefaultDeclaration { declaration },
            &[
                Part::Text("export default "),
                Part::Child(declaration),
                Part::Text(close),
            ],
        )
    }

    /// `export declaration`
    pub fn export_named(&mut self, declaration: NodeId) -> NodeId {
        self.node(
            NodeKind::ExportNamedDeclaration {
                declaration: Some(declaration),
            },
            &[Part::Text("export "), Part::Child(declaration)],
        )
    }

    /// Top-level statements, one per line, with a trailing newline.
    pub fn program(&mut self, body: &[NodeId]) -> NodeId {
        let kind = NodeKind::Program {
            body: body.to_vec(),
        };
        self.joined(kind, "", body, "\n", "\n")
    }

    // ---- JSX ----------------------------------------------------------------

    /// A tag name: `div` or `Icons.Check`.
    pub fn jsx_name(&mut self, name: &str) -> NodeId {
        let mut segments = name.split('.');
        let first = segments.next().unwrap_or_default();
        let mut expr = self.jsx_ident(first);
        for seg in segments {
            let property = self.jsx_ident(seg);
            expr = self.node(
                NodeKind::JsxMemberExpression {
                    object: expr,
                    property,
                },
                &[Part::Child(expr), Part::Text("."), Part::Child(property)],
            );
        }
        expr
    }

    fn jsx_ident(&mut self, name: &str) -> NodeId {
        self.node(
            NodeKind::JsxIdentifier {
                name: name.to_string(),
            },
            &[Part::Text(name)],
        )
    }

    /// `name="value"`
    pub fn jsx_attr_str(&mut self, name: &str, value: &str) -> NodeId {
        let value = self.string(value);
        self.jsx_attr(name, Some(value))
    }

    /// `name={expression}`
    pub fn jsx_attr_expr(&mut self, name: &str, expression: NodeId) -> NodeId {
        let container = self.jsx_container(Some(expression));
        self.jsx_attr(name, Some(container))
    }

    /// `name` or `name=<value>` where `value` is already built.
    pub fn jsx_attr(&mut self, name: &str, value: Option<NodeId>) -> NodeId {
        let name = self.jsx_ident(name);
        match value {
            Some(v) => self.node(
                NodeKind::JsxAttribute {
                    name,
                    value: Some(v),
                },
                &[Part::Child(name), Part::Text("="), Part::Child(v)],
            ),
            None => self.node(
                NodeKind::JsxAttribute { name, value: None },
                &[Part::Child(name)],
            ),
        }
    }

    /// `{...argument}`
    pub fn jsx_spread(&mut self, argument: NodeId) -> NodeId {
        self.node(
            NodeKind::JsxSpreadAttribute { argument },
            &[Part::Text("{..."), Part::Child(argument), Part::Text("}")],
        )
    }

    /// `{expression}` or `{}`
    pub fn jsx_container(&mut self, expression: Option<NodeId>) -> NodeId {
        match expression {
            Some(e) => self.node(
                NodeKind::JsxExpressionContainer {
                    expression: Some(e),
                },
                &[Part::Text("{"), Part::Child(e), Part::Text("}")],
            ),
            None => self.node(
                NodeKind::JsxExpressionContainer { expression: None },
                &[Part::Text("{}")],
            ),
        }
    }

    /// Raw text between tags.
    pub fn jsx_text(&mut self, value: &str) -> NodeId {
        self.node(
            NodeKind::JsxText {
                value: value.to_string(),
            },
            &[Part::Text(value)],
        )
    }

    /// `<name attrs />` when `children` is empty, else `<name attrs>children</name>`.
    pub fn element(&mut self, name: &str, attributes: &[NodeId], children: &[NodeId]) -> NodeId {
        let self_closing = children.is_empty();
        let open_name = self.jsx_name(name);
        let mut parts = vec![Part::Text("<"), Part::Child(open_name)];
        for a in attributes {
            parts.push(Part::Text(" "));
            parts.push(Part::Child(*a));
        }
        parts.push(Part::Text(if self_closing { " />" } else { ">" }));
        let opening = self.node(
            NodeKind::JsxOpeningElement {
                name: open_name,
                attributes: attributes.to_vec(),
                self_closing,
            },
            &parts,
        );

        let closing = if self_closing {
            None
        } else {
            let close_name = self.jsx_name(name);
            Some(self.node(
                NodeKind::JsxClosingElement { name: close_name },
                &[Part::Text("</"), Part::Child(close_name), Part::Text(">")],
            ))
        };

        let mut parts = vec![Part::Child(opening)];
        parts.extend(children.iter().map(|c| Part::Child(*c)));
        parts.extend(closing.map(Part::Child));
        self.node(
            NodeKind::JsxElement {
                opening,
                children: children.to_vec(),
                closing,
            },
            &parts,
        )
    }

    /// `<>children</>`
    pub fn fragment(&mut self, children: &[NodeId]) -> NodeId {
        let kind = NodeKind::JsxFragment {
            children: children.to_vec(),
        };
        self.joined(kind, "<>", children, "", "</>")
    }
}
