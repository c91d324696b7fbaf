//! Diagnostic rendering backends for human-readable and machine-readable output.

use crate::diagnostic::Diagnostic;
use crate::label::LabelStyle;
use lintel_source::SourceDb;
use serde::Serialize;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[C203] svg-currentcolor: Use "currentColor" instead of "#000".
///   --> src/icons/CheckIcon.tsx:3:15
///    |
///  3 |   <path fill="#000" d="M0 0" />
///    |              ^^^^^^
///    |
///    = help: fix available: replace with "currentColor"
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, ansi: &str) -> String {
        if self.color {
            format!("\x1b[{ansi}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = String::new();

        let head = format!("{}[{}]", diag.severity, diag.code);
        let head = if diag.severity.is_error() {
            self.paint(&head, "1;31")
        } else {
            self.paint(&head, "1;33")
        };
        if diag.rule.is_empty() {
            out.push_str(&format!("{head}: {}\n", diag.message));
        } else {
            out.push_str(&format!("{head} {}: {}\n", diag.rule, diag.message));
        }

        if !diag.primary_span.is_dummy() {
            let resolved = source_db.resolve_span(diag.primary_span);
            if resolved.is_multiline() {
                out.push_str(&format!("  --> {resolved:#}\n"));
            } else {
                out.push_str(&format!("  --> {resolved}\n"));
            }

            let file = source_db.get_file(diag.primary_span.file);
            let (line, col) = file.line_col(diag.primary_span.start);
            let line_num = format!("{line}");
            let padding = " ".repeat(line_num.len());
            let line_content = source_line(&file.content, diag.primary_span.start);

            out.push_str(&format!("{padding} |\n"));
            out.push_str(&format!("{line_num} | {line_content}\n"));

            // Multi-line spans are underlined to the end of their first line.
            let first_line_rest = line_content.len().saturating_sub(col as usize - 1);
            let span_len = (diag.primary_span.len() as usize).min(first_line_rest).max(1);
            let carets = self.paint(&"^".repeat(span_len), "1;36");
            let col_padding = " ".repeat((col as usize).saturating_sub(1));
            let primary_msg = diag
                .labels
                .iter()
                .find(|l| l.style == LabelStyle::Primary)
                .map(|l| format!(" {}", l.message))
                .unwrap_or_default();
            out.push_str(&format!("{padding} | {col_padding}{carets}{primary_msg}\n"));

            // Lints run per file, so related sites live next to the anchor.
            for label in diag.labels.iter().filter(|l| l.style == LabelStyle::Related) {
                if !label.points_into(diag.primary_span.file) {
                    continue;
                }
                let at = source_db.resolve_span(label.span);
                out.push_str(&format!("{padding} = {}: {}\n", at, label.message));
            }
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        if let Some(fix) = &diag.fix {
            out.push_str(&format!("   = help: fix available: {}\n", fix.message));
        }

        out
    }
}

/// Renders each diagnostic as one line of JSON.
///
/// The object carries the serialized [`Diagnostic`] plus the file path and
/// resolved 1-indexed `line`/`column` and `end_line`/`end_column`, for
/// editors and CI annotations.
pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_column: Option<u32>,
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
}

impl DiagnosticRenderer for JsonRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let resolved =
            (!diag.primary_span.is_dummy()).then(|| source_db.resolve_span(diag.primary_span));
        let record = JsonRecord {
            path: resolved.as_ref().map(|r| r.display_path()),
            line: resolved.as_ref().map(|r| r.start_line),
            column: resolved.as_ref().map(|r| r.start_col),
            end_line: resolved.as_ref().map(|r| r.end_line),
            end_column: resolved.as_ref().map(|r| r.end_col),
            diagnostic: diag,
        };
        serde_json::to_string(&record).unwrap_or_else(|err| {
            format!("{{\"error\":\"failed to serialize diagnostic: {err}\"}}")
        })
    }
}

/// Extracts the line of source code containing the given byte offset.
fn source_line(content: &str, byte_offset: u32) -> &str {
    let offset = (byte_offset as usize).min(content.len());
    let before = content.get(..offset).unwrap_or_default();
    let start = before.rfind('\n').map_or(0, |pos| pos + 1);
    let end = content
        .get(offset..)
        .and_then(|rest| rest.find('\n'))
        .map_or(content.len(), |pos| offset + pos);
    content.get(start..end).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};
    use crate::label::Label;
    use crate::suggested_fix::{Replacement, SuggestedFix};
    use lintel_source::Span;
    use std::collections::BTreeMap;

    fn icon_db() -> (SourceDb, Span) {
        let mut source_db = SourceDb::new();
        let file_id = source_db.add_source(
            "src/icons/CheckIcon.tsx",
            "<svg>\n  <path fill=\"#000\" />\n</svg>\n".to_string(),
        );
        (source_db, Span::new(file_id, 19, 25))
    }

    #[test]
    fn render_with_span_and_fix() {
        let (source_db, span) = icon_db();
        let code = DiagnosticCode::new(Category::Convention, 203);
        let diag = Diagnostic::warning(code, "", span)
            .with_rule("svg-currentcolor")
            .with_template(
                "useCurrentColor",
                "Use \"currentColor\" instead of {{color}}.",
                BTreeMap::from([("color".to_string(), "\"#000\"".to_string())]),
            )
            .with_label(Label::primary(span, "hard-coded color"))
            .with_fix(SuggestedFix::new(
                "replace with \"currentColor\"",
                vec![Replacement::new(span, "\"currentColor\"")],
            ));

        let output = TerminalRenderer::new(false).render(&diag, &source_db);
        assert!(output.starts_with(
            "warning[C203] svg-currentcolor: Use \"currentColor\" instead of \"#000\".\n"
        ));
        assert!(output.contains("--> src/icons/CheckIcon.tsx:2:14"));
        assert!(output.contains("2 |   <path fill=\"#000\" />"));
        assert!(output.contains("^^^^^^ hard-coded color"));
        assert!(output.contains("= help: fix available: replace with \"currentColor\""));
    }

    #[test]
    fn related_label_and_multiline_anchor() {
        let mut source_db = SourceDb::new();
        let file_id = source_db.add_source(
            "src/Main.tsx",
            "function Main() {}\nfunction Sub() {\n  return <span />;\n}\n".to_string(),
        );
        let code = DiagnosticCode::new(Category::Convention, 201);
        let diag = Diagnostic::warning(code, "two components", Span::new(file_id, 19, 56))
            .with_rule("one-component-per-file")
            .with_label(Label::related(
                Span::new(file_id, 0, 18),
                "first component declared here",
            ))
            .with_label(Label::related(Span::DUMMY, "nowhere"));

        let output = TerminalRenderer::new(false).render(&diag, &source_db);
        assert!(output.contains("--> src/Main.tsx:2:1-4:1"));
        assert!(output.contains("= src/Main.tsx:1:1: first component declared here"));
        assert!(!output.contains("nowhere"));
    }

    #[test]
    fn render_notes_without_span() {
        let source_db = SourceDb::new();
        let code = DiagnosticCode::new(Category::Warning, 102);
        let diag = Diagnostic::warning(code, "inline object prop", Span::DUMMY)
            .with_note("a new object is created on every render")
            .with_help("hoist the object out of the component");

        let output = TerminalRenderer::new(false).render(&diag, &source_db);
        assert!(output.contains("warning[W102]: inline object prop"));
        assert!(!output.contains("-->"));
        assert!(output.contains("= note: a new object is created on every render"));
        assert!(output.contains("= help: hoist the object out of the component"));
    }

    #[test]
    fn color_codes_only_when_enabled() {
        let source_db = SourceDb::new();
        let code = DiagnosticCode::new(Category::Error, 101);
        let diag = Diagnostic::error(code, "element used as component", Span::DUMMY);
        assert!(TerminalRenderer::new(true)
            .render(&diag, &source_db)
            .contains("\x1b[1;31merror[E101]\x1b[0m"));
        assert!(!TerminalRenderer::new(false)
            .render(&diag, &source_db)
            .contains('\x1b'));
    }

    #[test]
    fn json_carries_location_and_fields() {
        let (source_db, span) = icon_db();
        let code = DiagnosticCode::new(Category::Convention, 203);
        let diag = Diagnostic::warning(code, "hard-coded color", span).with_rule("svg-currentcolor");
        let line = JsonRenderer.render(&diag, &source_db);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["path"], "src/icons/CheckIcon.tsx");
        assert_eq!(value["line"], 2);
        assert_eq!(value["column"], 14);
        assert_eq!(value["end_line"], 2);
        assert_eq!(value["end_column"], 19);
        assert_eq!(value["rule"], "svg-currentcolor");
        assert_eq!(value["code"]["number"], 203);
    }

    #[test]
    fn source_line_handles_edges() {
        assert_eq!(source_line("a\nbc\n", 3), "bc");
        assert_eq!(source_line("abc", 0), "abc");
        assert_eq!(source_line("abc", 99), "abc");
    }
}
