//! Byte-offset ranges within a source buffer.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A byte offset range within a source buffer.
///
/// `start` is inclusive and `end` is exclusive. Node spans, diagnostic anchors
/// and fix replacements all index into the *original* text of the file; a
/// zero-length span denotes an insertion point.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The buffer this span belongs to.
    pub file: FileId,
    /// Byte offset of the start of the span (inclusive).
    pub start: u32,
    /// Byte offset of the end of the span (exclusive).
    pub end: u32,
}

impl Span {
    /// A dummy span used when no source location is available.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a new span in the given file with the given byte range.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Creates a zero-length span at `offset`.
    pub fn empty_at(file: FileId, offset: u32) -> Self {
        Self::new(file, offset, offset)
    }

    /// Merges two spans in the same file into one covering both.
    ///
    /// # Panics
    ///
    /// Panics if the two spans are from different files.
    pub fn merge(self, other: Span) -> Span {
        assert_eq!(
            self.file, other.file,
            "cannot merge spans from different files"
        );
        Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns the span between the end of `self` and the start of `other`.
    ///
    /// Returns `None` when `other` starts before `self` ends.
    pub fn between(self, other: Span) -> Option<Span> {
        (self.file == other.file && self.end <= other.start)
            .then(|| Span::new(self.file, self.end, other.start))
    }

    /// Returns the length of this span in bytes.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if this span has zero length.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if this is the dummy span.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }

    /// Returns `true` if `other` lies entirely inside this span.
    pub fn contains(&self, other: Span) -> bool {
        self.file == other.file && self.start <= other.start && other.end <= self.end
    }

    /// Returns `true` if the two spans share at least one byte.
    ///
    /// Two insertion points at the same offset also count as overlapping,
    /// since their relative order would be ambiguous.
    pub fn overlaps(&self, other: Span) -> bool {
        if self.file != other.file {
            return false;
        }
        if self.is_empty() && other.is_empty() {
            return self.start == other.start;
        }
        self.start < other.end && other.start < self.end
    }

    /// Returns `true` if the span is well-formed and fits a buffer of `len` bytes.
    pub fn fits(&self, len: usize) -> bool {
        self.start <= self.end && (self.end as usize) <= len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f() -> FileId {
        FileId::from_raw(0)
    }

    #[test]
    fn merge_takes_outer_bounds() {
        let m = Span::new(f(), 5, 15).merge(Span::new(f(), 10, 25));
        assert_eq!((m.start, m.end), (5, 25));
    }

    #[test]
    fn between_spans() {
        let a = Span::new(f(), 0, 6);
        let b = Span::new(f(), 15, 20);
        assert_eq!(a.between(b), Some(Span::new(f(), 6, 15)));
        assert_eq!(b.between(a), None);
    }

    #[test]
    fn contains_and_overlaps() {
        let outer = Span::new(f(), 0, 20);
        let inner = Span::new(f(), 4, 8);
        let tail = Span::new(f(), 18, 30);
        let after = Span::new(f(), 20, 22);
        assert!(outer.contains(inner));
        assert!(!outer.contains(tail));
        assert!(outer.overlaps(tail));
        assert!(!outer.overlaps(after));
    }

    #[test]
    fn insertion_points_overlap_only_at_same_offset() {
        let a = Span::empty_at(f(), 4);
        assert!(a.overlaps(Span::empty_at(f(), 4)));
        assert!(!a.overlaps(Span::empty_at(f(), 5)));
        assert!(!a.overlaps(Span::new(f(), 0, 4)));
    }

    #[test]
    fn fits_buffer() {
        assert!(Span::new(f(), 0, 10).fits(10));
        assert!(!Span::new(f(), 0, 11).fits(10));
        assert!(!Span::new(f(), 6, 5).fits(10));
    }

    #[test]
    fn len_and_empty() {
        let s = Span::new(f(), 10, 20);
        assert_eq!(s.len(), 10);
        assert!(!s.is_empty());
        assert!(Span::empty_at(f(), 3).is_empty());
        assert!(Span::DUMMY.is_dummy());
    }

    #[test]
    fn serde_roundtrip() {
        let s = Span::new(FileId::from_raw(1), 10, 20);
        let json = serde_json::to_string(&s).unwrap();
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
