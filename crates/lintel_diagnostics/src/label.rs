//! Labels that point at source beyond a diagnostic's anchor.

use lintel_source::{FileId, Span};
use serde::{Deserialize, Serialize};

/// How a label relates to the diagnostic that carries it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// Annotates the anchor node itself; rendered next to the carets.
    Primary,
    /// Another site a cross-site rule correlated with the anchor, such as
    /// the attribute that passed a prop or the parameter that declared it.
    Related,
}

/// A span with a short message, attached to a [`Diagnostic`](crate::Diagnostic).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The annotated span.
    pub span: Span,
    /// Shown next to the span.
    pub message: String,
    /// Anchor annotation or related site.
    pub style: LabelStyle,
}

impl Label {
    /// A message under the anchor's carets.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Primary,
        }
    }

    /// A second site the finding depends on.
    pub fn related(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Related,
        }
    }

    /// `true` if the label points into `file`. Synthetic spans point nowhere.
    pub fn points_into(&self, file: FileId) -> bool {
        !self.span.is_dummy() && self.span.file == file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn related_label_points_into_its_file() {
        let file = FileId::from_raw(0);
        let label = Label::related(Span::new(file, 12, 30), "a JSX element is passed here");
        assert_eq!(label.style, LabelStyle::Related);
        assert!(label.points_into(file));
        assert!(!label.points_into(FileId::from_raw(1)));
    }

    #[test]
    fn synthetic_span_points_nowhere() {
        let label = Label::primary(Span::DUMMY, "hard-coded color");
        assert!(!label.points_into(Span::DUMMY.file));
    }

    #[test]
    fn style_serializes_lowercase() {
        let label = Label::related(Span::DUMMY, "declared here");
        let json = serde_json::to_value(&label).unwrap();
        assert_eq!(json["style"], "related");
    }
}
