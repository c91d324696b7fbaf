//! A source buffer with line-start indexing for fast line/column lookup.

use crate::file_id::FileId;
use crate::span::Span;
use std::path::PathBuf;

/// A source buffer handed to the linter by the host.
///
/// Stores the text with precomputed line-start offsets. The path is only used
/// for file-activation predicates and diagnostic rendering; the linter never
/// touches the filesystem through it.
#[derive(Clone, Debug)]
pub struct SourceFile {
    /// The unique identifier for this buffer within the [`SourceDb`](crate::SourceDb).
    pub id: FileId,
    /// The path of the file (or a synthetic name for in-memory buffers).
    pub path: PathBuf,
    /// The full text of the buffer.
    pub content: String,
    /// Byte offsets of each line start (the first entry is always 0).
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Creates a new `SourceFile` with precomputed line starts.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        Self {
            id,
            path,
            content,
            line_starts,
        }
    }

    /// Converts a byte offset into 1-indexed (line, column) coordinates.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Returns the text covered by `span`, or `None` if the span does not fit
    /// the buffer or splits a UTF-8 character.
    pub fn text(&self, span: Span) -> Option<&str> {
        if !span.fits(self.content.len()) {
            return None;
        }
        self.content.get(span.start as usize..span.end as usize)
    }

    /// Returns the length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the path with `/` separators, for glob and substring matching.
    pub fn normalized_path(&self) -> String {
        self.path.to_string_lossy().replace('\\', "/")
    }

    /// Returns the final path component.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// Returns the leading whitespace of the line containing `byte_offset`.
    pub fn indentation_at(&self, byte_offset: u32) -> &str {
        let (line, _) = self.line_col(byte_offset);
        let start = self.line_starts[(line - 1) as usize] as usize;
        let rest = &self.content[start..];
        let width = rest
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(rest.len());
        &rest[..width]
    }
}

/// Computes the byte offsets of each line start in the given content.
fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}
