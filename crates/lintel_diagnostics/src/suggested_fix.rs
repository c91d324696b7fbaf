//! Fixes as text replacements over the original buffer, and their application.

use lintel_source::Span;
use serde::{Deserialize, Serialize};

/// A text replacement to apply to the original source as part of a fix.
///
/// A zero-length span is an insertion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// The source span to replace.
    pub span: Span,
    /// The new text to insert in place of the span.
    pub new_text: String,
}

impl Replacement {
    /// Creates a replacement.
    pub fn new(span: Span, new_text: impl Into<String>) -> Self {
        Self {
            span,
            new_text: new_text.into(),
        }
    }
}

/// A fix that can be automatically applied to source code.
///
/// All replacements belong to one atomic edit: a host applies every one of
/// them or none. Replacements never overlap each other.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedFix {
    /// A description of what this fix does.
    pub message: String,
    /// The set of text replacements that implement this fix.
    pub replacements: Vec<Replacement>,
}

impl SuggestedFix {
    /// Creates a fix from its description and replacements.
    pub fn new(message: impl Into<String>, replacements: Vec<Replacement>) -> Self {
        Self {
            message: message.into(),
            replacements,
        }
    }

    /// Returns the smallest start offset among the replacements.
    pub fn first_offset(&self) -> Option<u32> {
        self.replacements.iter().map(|r| r.span.start).min()
    }

    fn is_applicable(&self, source: &str) -> bool {
        if self.replacements.is_empty() {
            return false;
        }
        let in_bounds = self.replacements.iter().all(|r| {
            r.span.fits(source.len())
                && source.is_char_boundary(r.span.start as usize)
                && source.is_char_boundary(r.span.end as usize)
        });
        in_bounds && !self.overlaps_itself()
    }

    fn overlaps_itself(&self) -> bool {
        self.replacements.iter().enumerate().any(|(i, r)| {
            self.replacements[i + 1..]
                .iter()
                .any(|other| r.span.overlaps(other.span))
        })
    }

    fn overlaps(&self, accepted: &[Replacement]) -> bool {
        self.replacements
            .iter()
            .any(|r| accepted.iter().any(|a| r.span.overlaps(a.span)))
    }
}

/// Applies a batch of fixes to `source`, the text they were computed against.
///
/// Fixes are considered in order of their first offset. A fix is skipped when
/// it is empty, reaches outside the buffer, overlaps itself, or overlaps a fix
/// that was already accepted. Returns the patched text and the number of
/// fixes applied.
pub fn apply_fixes<'a, I>(source: &str, fixes: I) -> (String, usize)
where
    I: IntoIterator<Item = &'a SuggestedFix>,
{
    let mut candidates: Vec<&SuggestedFix> = fixes
        .into_iter()
        .filter(|f| f.is_applicable(source))
        .collect();
    candidates.sort_by_key(|f| f.first_offset());

    let mut accepted: Vec<Replacement> = Vec::new();
    let mut applied = 0;
    for fix in candidates {
        if fix.overlaps(&accepted) {
            continue;
        }
        accepted.extend(fix.replacements.iter().cloned());
        applied += 1;
    }

    accepted.sort_by_key(|r| (r.span.start, r.span.end));
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for r in &accepted {
        out.push_str(&source[cursor..r.span.start as usize]);
        out.push_str(&r.new_text);
        cursor = r.span.end as usize;
    }
    out.push_str(&source[cursor..]);
    (out, applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintel_source::FileId;

    fn span(start: u32, end: u32) -> Span {
        Span::new(FileId::from_raw(0), start, end)
    }

    fn fix(parts: &[(u32, u32, &str)]) -> SuggestedFix {
        SuggestedFix::new(
            "test",
            parts
                .iter()
                .map(|(s, e, t)| Replacement::new(span(*s, *e), *t))
                .collect(),
        )
    }

    #[test]
    fn applies_disjoint_fixes() {
        let source = "fill=\"red\" stroke=\"red\"";
        let a = fix(&[(5, 10, "\"currentColor\"")]);
        let b = fix(&[(18, 23, "\"currentColor\"")]);
        let (out, n) = apply_fixes(source, [&b, &a]);
        assert_eq!(n, 2);
        assert_eq!(out, "fill=\"currentColor\" stroke=\"currentColor\"");
    }

    #[test]
    fn multi_part_fix_is_atomic() {
        let source = "export default Icon;";
        let f = fix(&[(0, 0, "import { memo } from \"react\";\n"), (15, 19, "memo(Icon)")]);
        let (out, n) = apply_fixes(source, [&f]);
        assert_eq!(n, 1);
        assert_eq!(out, "import { memo } from \"react\";\nexport default memo(Icon);");
    }

    #[test]
    fn overlapping_fix_is_skipped() {
        let source = "abcdef";
        let first = fix(&[(1, 3, "X")]);
        let second = fix(&[(2, 4, "Y"), (5, 6, "Z")]);
        let (out, n) = apply_fixes(source, [&second, &first]);
        assert_eq!(n, 1);
        assert_eq!(out, "aXdef");
    }

    #[test]
    fn same_point_insertions_conflict() {
        let source = "ab";
        let first = fix(&[(1, 1, "X")]);
        let second = fix(&[(1, 1, "Y")]);
        let (out, n) = apply_fixes(source, [&first, &second]);
        assert_eq!(n, 1);
        assert_eq!(out, "aXb");
    }

    #[test]
    fn insertion_at_replacement_edge_is_allowed() {
        let source = "abc";
        let a = fix(&[(1, 2, "B")]);
        let b = fix(&[(2, 2, "!")]);
        let (out, n) = apply_fixes(source, [&a, &b]);
        assert_eq!(n, 2);
        assert_eq!(out, "aB!c");
    }

    #[test]
    fn invalid_fixes_are_skipped() {
        let source = "abc";
        let out_of_bounds = fix(&[(2, 9, "x")]);
        let inverted = fix(&[(2, 1, "x")]);
        let self_overlap = fix(&[(0, 2, "x"), (1, 3, "y")]);
        let empty = fix(&[]);
        let (out, n) = apply_fixes(source, [&out_of_bounds, &inverted, &self_overlap, &empty]);
        assert_eq!(n, 0);
        assert_eq!(out, "abc");
    }
}
