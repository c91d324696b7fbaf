//! Builds fixes from primitive edits over the original buffer.

use lintel_diagnostics::{Replacement, SuggestedFix};
use lintel_source::{SourceFile, Span};

/// Accumulates the replacements of one fix.
///
/// Every edit is checked against the buffer as it is added. Once any edit is
/// out of range, splits a character, or overlaps an earlier edit, the fixer is
/// spoiled and [`finish`](Self::finish) returns `None`: the diagnostic is
/// still reported, only without a fix.
pub struct Fixer<'a> {
    source: &'a SourceFile,
    replacements: Vec<Replacement>,
    spoiled: bool,
}

impl<'a> Fixer<'a> {
    /// Creates an empty fixer over `source`.
    pub fn new(source: &'a SourceFile) -> Self {
        Self {
            source,
            replacements: Vec::new(),
            spoiled: false,
        }
    }

    /// Replaces the text of `span`.
    pub fn replace(&mut self, span: Span, text: impl Into<String>) -> &mut Self {
        self.push(span, text.into());
        self
    }

    /// Inserts `text` right before `span`.
    pub fn insert_before(&mut self, span: Span, text: impl Into<String>) -> &mut Self {
        self.push(Span::empty_at(span.file, span.start), text.into());
        self
    }

    /// Inserts `text` right after `span`.
    pub fn insert_after(&mut self, span: Span, text: impl Into<String>) -> &mut Self {
        self.push(Span::empty_at(span.file, span.end), text.into());
        self
    }

    /// Deletes the text of `span`.
    pub fn remove(&mut self, span: Span) -> &mut Self {
        self.push(span, String::new());
        self
    }

    /// Replaces the byte range `start..end` of the buffer.
    pub fn replace_range(&mut self, start: u32, end: u32, text: impl Into<String>) -> &mut Self {
        self.push(Span::new(self.source.id, start, end), text.into());
        self
    }

    /// Returns `true` while every edit so far has been valid.
    pub fn is_valid(&self) -> bool {
        !self.spoiled
    }

    /// Returns `true` if no edit was added.
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Finishes the fix; `None` if empty or spoiled.
    pub fn finish(self, message: impl Into<String>) -> Option<SuggestedFix> {
        if self.spoiled || self.replacements.is_empty() {
            return None;
        }
        Some(SuggestedFix::new(message, self.replacements))
    }

    fn push(&mut self, span: Span, new_text: String) {
        if self.spoiled {
            return;
        }
        let content = &self.source.content;
        let valid = span.file == self.source.id
            && span.fits(content.len())
            && content.is_char_boundary(span.start as usize)
            && content.is_char_boundary(span.end as usize)
            && !self.replacements.iter().any(|r| r.span.overlaps(span));
        if valid {
            self.replacements.push(Replacement::new(span, new_text));
        } else {
            self.spoiled = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintel_diagnostics::apply_fixes;
    use lintel_source::FileId;

    fn source(text: &str) -> SourceFile {
        SourceFile::new(FileId::from_raw(0), "Icon.tsx".into(), text.to_string())
    }

    fn span(start: u32, end: u32) -> Span {
        Span::new(FileId::from_raw(0), start, end)
    }

    #[test]
    fn primitive_edits_in_insertion_order() {
        let src = source("export default Icon;");
        let mut f = Fixer::new(&src);
        f.insert_before(span(0, 6), "import { memo } from \"react\";\n")
            .replace(span(15, 19), "memo(Icon)");
        let fix = f.finish("wrap in memo").unwrap();
        assert_eq!(fix.replacements.len(), 2);
        assert_eq!(fix.replacements[0].span, span(0, 0));
        let (out, n) = apply_fixes(&src.content, [&fix]);
        assert_eq!(n, 1);
        assert_eq!(out, "import { memo } from \"react\";\nexport default memo(Icon);");
    }

    #[test]
    fn remove_and_insert_after() {
        let src = source("catch (e) {}");
        let mut f = Fixer::new(&src);
        f.remove(span(6, 9)).insert_after(span(10, 12), " // ignored");
        let fix = f.finish("edit").unwrap();
        let (out, _) = apply_fixes(&src.content, [&fix]);
        assert_eq!(out, "catch  {} // ignored");
    }

    #[test]
    fn out_of_range_spoils_fix() {
        let src = source("abc");
        let mut f = Fixer::new(&src);
        f.replace(span(0, 1), "x").replace_range(2, 10, "y");
        assert!(!f.is_valid());
        assert!(f.finish("bad").is_none());
    }

    #[test]
    fn overlap_spoils_fix() {
        let src = source("abcdef");
        let mut f = Fixer::new(&src);
        f.replace(span(0, 3), "x").replace(span(2, 4), "y");
        assert!(f.finish("bad").is_none());
    }

    #[test]
    fn foreign_file_spoils_fix() {
        let src = source("abc");
        let mut f = Fixer::new(&src);
        f.replace(Span::new(FileId::from_raw(5), 0, 1), "x");
        assert!(f.finish("bad").is_none());
    }

    #[test]
    fn empty_fixer_yields_none() {
        let src = source("abc");
        let f = Fixer::new(&src);
        assert!(f.is_empty());
        assert!(f.finish("nothing").is_none());
    }
}
