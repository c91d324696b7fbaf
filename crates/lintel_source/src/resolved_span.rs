//! Spans resolved to the `path:line:col` form editors and CI annotations use.

use std::fmt;
use std::path::PathBuf;

/// A span resolved to 1-indexed line/column coordinates.
///
/// Produced by [`SourceDb::resolve_span`](crate::SourceDb::resolve_span).
/// The end coordinate points at the last character of the span, not past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// The path of the source file, as registered with the database.
    pub file_path: PathBuf,
    /// First line of the span.
    pub start_line: u32,
    /// Column of the first character.
    pub start_col: u32,
    /// Line holding the last character.
    pub end_line: u32,
    /// Column of the last character.
    pub end_col: u32,
}

impl ResolvedSpan {
    /// The file path with `/` separators on every platform, matching the
    /// form path-glob options are written in.
    pub fn display_path(&self) -> String {
        self.file_path.to_string_lossy().replace('\\', "/")
    }

    /// `true` when the span runs past the end of its first line.
    pub fn is_multiline(&self) -> bool {
        self.end_line > self.start_line
    }
}

/// `path:line:col` of the start. The alternate form (`{:#}`) appends the
/// end as `-line:col`.
impl fmt::Display for ResolvedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.display_path(),
            self.start_line,
            self.start_col
        )?;
        if f.alternate() {
            write!(f, "-{}:{}", self.end_line, self.end_col)?;
        }
        Ok(())
    }
}
