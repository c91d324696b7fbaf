//! C203: SVG `currentColor`. Single-color icons should inherit their color.

use lintel_common::LintResult;
use lintel_config::{ConfigError, FilePatterns, RuleOptions};
use lintel_diagnostics::{Category, DiagnosticCode, Severity};
use lintel_source::SourceFile;
use lintel_syntax::{NodeId, NodeKind, NodeTag, SyntaxTree};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::context::{message_data, RuleContext};
use crate::helpers::{attribute_name, is_svg_root, string_attribute};
use crate::rules::icon_files;
use crate::{LintRule, OptionKind, RuleMeta, RuleOption, RuleSession};

static META: RuleMeta = RuleMeta {
    name: "svg-currentcolor",
    code: DiagnosticCode::new(Category::Convention, 203),
    description: "single-color icon hard-codes its color",
    default_severity: Severity::Warning,
    fixable: true,
    messages: &[(
        "useCurrentColor",
        "Icon {{ attribute }} is hard-coded to '{{ color }}'; use currentColor so the icon inherits its color",
    )],
    options: &[RuleOption {
        key: "files",
        kind: OptionKind::Globs,
        description: "files the rule runs on (default: icon-like files)",
    }],
};

const PAINT_ATTRIBUTES: &[&str] = &["fill", "stroke"];

const CURRENT_COLOR: &str = "currentColor";

/// Rewrites hard-coded `fill`/`stroke` values of single-color SVG icons to
/// `currentColor`.
///
/// An `<svg>` whose subtree uses two or more distinct colors is left alone
/// entirely. `none` and `currentColor` are not colors here.
pub struct SvgCurrentColor {
    files: FilePatterns,
}

impl Default for SvgCurrentColor {
    fn default() -> Self {
        Self {
            files: icon_files(),
        }
    }
}

impl LintRule for SvgCurrentColor {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscriptions(&self) -> &'static [NodeTag] {
        &[NodeTag::JsxElement]
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
    /// Multi-color verdict per SVG root.
    multi_color: FxHashMap<NodeId, bool>,
}

impl RuleSession for Session {
    fn visit(&mut self, node: NodeId, cx: &mut RuleContext<'_>) -> LintResult<()> {
        let tree = cx.tree();
        if !is_svg_root(tree, node) {
            return Ok(());
        }
        let multi = *self
            .multi_color
            .entry(node)
            .or_insert_with(|| is_multi_color(tree, node));
        if multi {
            return Ok(());
        }

        for (attr, name, literal, color) in paint_attributes(tree, node) {
            let mut fixer = cx.fixer();
            fixer.replace(tree.span(literal), format!("\"{CURRENT_COLOR}\""));
            let fix = fixer.finish("use currentColor");
            let data = message_data([("attribute", name), ("color", color)]);
            cx.report_with_fix(attr, "useCurrentColor", data, fix)?;
        }
        Ok(())
    }
}

/// Collects `(attribute, name, literal, value)` for every color-valued
/// `fill`/`stroke` in the subtree, in source order.
fn paint_attributes(tree: &SyntaxTree, root: NodeId) -> Vec<(NodeId, &str, NodeId, &str)> {
    tree.descendants(root)
        .filter(|id| matches!(tree.kind(*id), NodeKind::JsxAttribute { .. }))
        .filter_map(|attr| {
            let name = attribute_name(tree, attr)?;
            if !PAINT_ATTRIBUTES.contains(&name) {
                return None;
            }
            let (literal, value) = string_attribute(tree, attr)?;
            is_color(value).then_some((attr, name, literal, value))
        })
        .collect()
}

fn is_color(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && !value.eq_ignore_ascii_case("none")
        && !value.eq_ignore_ascii_case(CURRENT_COLOR)
}

fn is_multi_color(tree: &SyntaxTree, root: NodeId) -> bool {
    let distinct: FxHashSet<String> = paint_attributes(tree, root)
        .into_iter()
        .map(|(.., value)| value.trim().to_ascii_lowercase())
        .collect();
    distinct.len() > 1
}
