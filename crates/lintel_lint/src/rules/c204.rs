//! C204: Memoized export. Icon components should be exported through `memo`.
//!
//! The rule pairs the file's default export with an SVG root seen anywhere
//! in the file. Either may come first; the pairing is reconciled when the
//! second one arrives, or at the end of the file.
//!
//! The fix is a single atomic edit set:
//! - make `memo` (and the icon props type, if needed) available, by extending
//!   an existing named import, going through a namespace/default import, or
//!   adding `import { ... } from "react";`
//! - annotate the component's first parameter when it has no type
//! - wrap the exported reference in `memo(...)`

use lintel_common::LintResult;
use lintel_config::{ConfigError, FilePatterns, RuleOptions};
use lintel_diagnostics::{Category, DiagnosticCode, Severity, SuggestedFix};
use lintel_source::SourceFile;
use lintel_syntax::{NodeId, NodeKind, NodeTag, SyntaxTree};

use crate::context::{message_data, RuleContext};
use crate::fixer::Fixer;
use crate::helpers::{
    as_function, find_module_function, imports, is_memo_call, is_svg_root, program_body,
    skip_parens,
};
use crate::rules::icon_files;
use crate::{LintRule, OptionKind, RuleMeta, RuleOption, RuleSession};

static META: RuleMeta = RuleMeta {
    name: "memoized-export",
    code: DiagnosticCode::new(Category::Convention, 204),
    description: "icon component is exported without memo",
    default_severity: Severity::Warning,
    fixable: true,
    messages: &[(
        "missingMemo",
        "Icon component '{{ name }}' should be exported wrapped in memo",
    )],
    options: &[RuleOption {
        key: "files",
        kind: OptionKind::Globs,
        description: "files the rule runs on (default: icon-like files)",
    }],
};

const REACT: &str = "react";
const REACT_NATIVE_SVG: &str = "react-native-svg";

/// Requires the default export of an icon file to be wrapped in `memo`.
pub struct MemoizedExport {
    files: FilePatterns,
}

impl Default for MemoizedExport {
    fn default() -> Self {
        Self {
            files: icon_files(),
        }
    }
}

impl LintRule for MemoizedExport {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscriptions(&self) -> &'static [NodeTag] {
        &[NodeTag::JsxElement, NodeTag::ExportDefaultDeclaration]
    }

    fn create(&self) -> Box<dyn RuleSession + '_> {
        Box::new(Session::default())
    }

    fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        options.check_keys(&["files"])?;
        if let Some(files) = options.patterns("files")? {
            self.files = files;
        }
        Ok(())
    }

    fn applies_to(&self, file: &SourceFile) -> bool {
        self.files.matches(&file.normalized_path())
    }
}

#[derive(Default)]
struct Session {
    last_svg: Option<NodeId>,
    export: Option<NodeId>,
    done: bool,
}

impl Session {
    fn reconcile(&mut self, cx: &mut RuleContext<'_>) -> LintResult<()> {
        if self.done {
            return Ok(());
        }
        let (Some(_), Some(export)) = (self.last_svg, self.export) else {
            return Ok(());
        };
        self.done = true;

        let tree = cx.tree();
        let Some(exported) = resolve_export(tree, export) else {
            return Ok(());
        };
        let fix = build_fix(cx, export, &exported);
        cx.report_with_fix(
            exported.anchor,
            "missingMemo",
            message_data([("name", exported.name.as_str())]),
            fix,
        )
    }
}

impl RuleSession for Session {
    fn visit(&mut self, node: NodeId, cx: &mut RuleContext<'_>) -> LintResult<()> {
        let tree = cx.tree();
        match tree.kind(node) {
            NodeKind::ExportDefaultDeclaration { .. } => self.export = Some(node),
            NodeKind::JsxElement { .. } if is_svg_root(tree, node) => self.last_svg = Some(node),
            _ => return Ok(()),
        }
        self.reconcile(cx)
    }

    fn finish(&mut self, cx: &mut RuleContext<'_>) -> LintResult<()> {
        self.reconcile(cx)
    }
}

/// What the default export refers to.
struct Exported {
    name: String,
    /// The exported identifier, or the exported declaration.
    anchor: NodeId,
    /// `export default function X() {}` rather than `export default X;`.
    is_declaration: bool,
    /// The component function, when it is one.
    function: Option<NodeId>,
}

fn resolve_export(tree: &SyntaxTree, export: NodeId) -> Option<Exported> {
    let NodeKind::ExportDefaultDeclaration { declaration } = tree.kind(export) else {
        return None;
    };
    let target = skip_parens(tree, *declaration);
    match tree.kind(target) {
        NodeKind::Identifier { name, .. } => {
            if is_bound_to_memo(tree, name) {
                return None;
            }
            Some(Exported {
                name: name.clone(),
                anchor: target,
                is_declaration: false,
                function: find_module_function(tree, name),
            })
        }
        NodeKind::FunctionDeclaration(f) => Some(Exported {
            name: tree.ident_name(f.id?)?.to_string(),
            anchor: target,
            is_declaration: true,
            function: Some(target),
        }),
        NodeKind::ClassDeclaration { id, .. } => Some(Exported {
            name: tree.ident_name((*id)?)?.to_string(),
            anchor: target,
            is_declaration: true,
            function: None,
        }),
        // Already memoized, anonymous, or not a component reference.
        _ => None,
    }
}

/// `const name = memo(...)` at module level.
fn is_bound_to_memo(tree: &SyntaxTree, name: &str) -> bool {
    program_body(tree).iter().any(|stmt| {
        let stmt = match tree.kind(*stmt) {
            NodeKind::ExportNamedDeclaration {
                declaration: Some(d),
            } => *d,
            _ => *stmt,
        };
        let NodeKind::VariableDeclaration { declarations, .. } = tree.kind(stmt) else {
            return false;
        };
        declarations.iter().any(|d| {
            matches!(
                tree.kind(*d),
                NodeKind::VariableDeclarator { id, init: Some(init) }
                    if tree.ident_name(*id) == Some(name) && is_memo_call(tree, *init)
            )
        })
    })
}

/// The shape of one `import` statement.
struct ImportShape<'t> {
    /// `(specifier, imported, local)` for each `{ ... }` entry.
    named: Vec<(NodeId, &'t str, &'t str)>,
    default: Option<(NodeId, &'t str)>,
    namespace: Option<&'t str>,
}

impl<'t> ImportShape<'t> {
    fn find(tree: &'t SyntaxTree, source: &str) -> Option<Self> {
        imports(tree).into_iter().find_map(|decl| {
            let NodeKind::ImportDeclaration {
                source: from,
                specifiers,
                type_only: false,
            } = tree.kind(decl)
            else {
                return None;
            };
            if from != source {
                return None;
            }
            let mut shape = ImportShape {
                named: Vec::new(),
                default: None,
                namespace: None,
            };
            for spec in specifiers {
                match tree.kind(*spec) {
                    NodeKind::ImportSpecifier { imported, local } => {
                        shape.named.push((*spec, imported.as_str(), local.as_str()))
                    }
                    NodeKind::ImportDefaultSpecifier { local } => {
                        shape.default = Some((*spec, local.as_str()))
                    }
                    NodeKind::ImportNamespaceSpecifier { local } => shape.namespace = Some(local.as_str()),
                    _ => {}
                }
            }
            Some(shape)
        })
    }

    fn local_of(&self, imported: &str) -> Option<&'t str> {
        self.named
            .iter()
            .find(|(_, name, _)| *name == imported)
            .map(|(_, _, local)| *local)
    }

    /// The binding that reaches the module's members as `Local.member`.
    fn object(&self) -> Option<&'t str> {
        self.namespace.or(self.default.map(|(_, local)| local))
    }
}

/// Resolves names exported by `react`, recording the ones that must be
/// imported.
struct ReactNames<'t> {
    import: Option<ImportShape<'t>>,
    missing: Vec<&'static str>,
}

impl ReactNames<'_> {
    fn reference(&mut self, name: &'static str) -> String {
        if let Some(import) = &self.import {
            if let Some(local) = import.local_of(name) {
                return local.to_string();
            }
            if import.named.is_empty() {
                if let Some(object) = import.object() {
                    return format!("{object}.{name}");
                }
            }
        }
        if !self.missing.contains(&name) {
            self.missing.push(name);
        }
        name.to_string()
    }
}

fn build_fix(cx: &RuleContext<'_>, export: NodeId, exported: &Exported) -> Option<SuggestedFix> {
    let tree = cx.tree();
    let mut fixer = cx.fixer();
    let mut react = ReactNames {
        import: ImportShape::find(tree, REACT),
        missing: Vec::new(),
    };
    let mut new_imports = Vec::new();

    let memo = react.reference("memo");

    if let Some(param) = exported.function.and_then(|f| unannotated_param(tree, f)) {
        let props = match ImportShape::find(tree, REACT_NATIVE_SVG) {
            Some(native) => native_props_type(tree, &native, &mut fixer, &mut new_imports),
            None => format!("{}<SVGSVGElement>", react.reference("SVGProps")),
        };
        annotate(cx, param, &props, &mut fixer);
    }

    if !react.missing.is_empty() {
        let names = react.missing.join(", ");
        match &react.import {
            Some(import) if !import.named.is_empty() => {
                if let Some((last, ..)) = import.named.last() {
                    fixer.insert_after(tree.span(*last), format!(", {names}"));
                }
            }
            _ => new_imports.push(format!("import {{ {names} }} from \"{REACT}\";")),
        }
    }
    if !new_imports.is_empty() {
        let statements = new_imports.join("\n");
        match imports(tree).last() {
            Some(last) => {
                fixer.insert_after(tree.span(*last), format!("\n{statements}"));
            }
            None => {
                fixer.replace_range(0, 0, format!("{statements}\n"));
            }
        }
    }

    if exported.is_declaration {
        let export_span = tree.span(export);
        let decl_span = tree.span(exported.anchor);
        fixer.replace_range(export_span.start, decl_span.start, "");
        fixer.insert_after(
            export_span,
            format!("\n\nexport default {memo}({});", exported.name),
        );
    } else {
        fixer.replace(
            tree.span(exported.anchor),
            format!("{memo}({})", exported.name),
        );
    }

    fixer.finish("wrap the default export in memo")
}

/// Returns the binding of the first parameter if it has no type annotation.
fn unannotated_param(tree: &SyntaxTree, func: NodeId) -> Option<NodeId> {
    let first = *as_function(tree, func)?.params.first()?;
    let binding = match tree.kind(first) {
        NodeKind::AssignmentPattern { left, .. } => *left,
        _ => first,
    };
    match tree.kind(binding) {
        NodeKind::Identifier {
            type_annotation: None,
            ..
        }
        | NodeKind::ObjectPattern {
            type_annotation: None,
            ..
        } => Some(binding),
        _ => None,
    }
}

fn annotate(cx: &RuleContext<'_>, param: NodeId, props: &str, fixer: &mut Fixer<'_>) {
    let span = cx.span(param);
    let before = cx
        .source()
        .content
        .get(..span.start as usize)
        .unwrap_or_default()
        .trim_end();
    if before.ends_with('(') || before.ends_with(',') {
        fixer.insert_after(span, format!(": {props}"));
    } else {
        // `props => ...`
        fixer.replace(span, format!("({}: {props})", cx.text(param)));
    }
}

/// Makes `SvgProps` from react-native-svg available and returns how to name it.
fn native_props_type(
    tree: &SyntaxTree,
    native: &ImportShape<'_>,
    fixer: &mut Fixer<'_>,
    new_imports: &mut Vec<String>,
) -> String {
    if let Some(local) = native.local_of("SvgProps") {
        return local.to_string();
    }
    if let Some(ns) = native.namespace {
        return format!("{ns}.SvgProps");
    }
    if let Some((last, ..)) = native.named.last() {
        fixer.insert_after(tree.span(*last), ", SvgProps");
    } else if let Some((default, _)) = native.default {
        fixer.insert_after(tree.span(default), ", { SvgProps }");
    } else {
        new_imports.push(format!("import {{ SvgProps }} from \"{REACT_NATIVE_SVG}\";"));
    }
    "SvgProps".to_string()
}
