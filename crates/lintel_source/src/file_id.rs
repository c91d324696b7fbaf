//! Opaque identifier for a source buffer loaded into the [`SourceDb`](crate::SourceDb).

use serde::{Deserialize, Serialize};

/// Opaque identifier for a source buffer.
///
/// Every node span and every fix replacement carries the `FileId` of the
/// buffer its offsets index into.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// A dummy file ID used for synthetic spans.
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Creates a `FileId` from a raw `u32` value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw `u32` value of this `FileId`.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_value_is_preserved() {
        assert_eq!(FileId::from_raw(3).as_raw(), 3);
    }

    #[test]
    fn dummy_is_distinct() {
        assert_ne!(FileId::DUMMY, FileId::from_raw(0));
    }
}
