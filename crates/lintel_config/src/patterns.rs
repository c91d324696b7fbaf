//! Glob predicates used to activate rules for particular files.

use crate::error::ConfigError;
use globset::{Glob, GlobSet, GlobSetBuilder};

/// A compiled set of globs matched against `/`-separated file paths.
#[derive(Debug, Clone)]
pub struct FilePatterns {
    patterns: Vec<String>,
    set: GlobSet,
}

impl FilePatterns {
    /// Compiles `patterns`; an empty list matches nothing.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidGlob {
                pattern: pattern.to_string(),
                reason: e.kind().to_string(),
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| ConfigError::InvalidGlob {
            pattern: patterns
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(", "),
            reason: e.to_string(),
        })?;
        Ok(Self {
            patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
            set,
        })
    }

    /// A set that matches nothing.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }

    /// Compiles built-in defaults, falling back to [`empty`](Self::empty) if
    /// one of them does not compile.
    pub fn defaults(patterns: &[&str]) -> Self {
        Self::new(patterns).unwrap_or_else(|_| Self::empty())
    }

    /// Returns `true` if any pattern matches `path`.
    ///
    /// Backslashes are normalized to `/` first, so Windows paths match the
    /// same globs.
    pub fn matches(&self, path: &str) -> bool {
        if path.contains('\\') {
            self.set.is_match(path.replace('\\', "/"))
        } else {
            self.set.is_match(path)
        }
    }

    /// Returns the source patterns.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns `true` if there are no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("src/icons/Check.tsx", true)]
    #[case("icons/Check.tsx", true)]
    #[case("src/components/CheckIcon.tsx", true)]
    #[case("CheckIcon.tsx", true)]
    #[case("src\\icons\\Check.tsx", true)]
    #[case("src/components/Button.tsx", false)]
    #[case("src/components/CheckIcon.ts", false)]
    fn icon_globs(#[case] path: &str, #[case] expected: bool) {
        let p = FilePatterns::new(&["**/icons/**", "**/*Icon.tsx"]).unwrap();
        assert_eq!(p.matches(path), expected);
    }

    #[test]
    fn empty_matches_nothing() {
        let p = FilePatterns::new::<&str>(&[]).unwrap();
        assert!(p.is_empty());
        assert!(!p.matches("src/icons/Check.tsx"));
    }

    #[test]
    fn defaults_fall_back_to_empty() {
        assert!(FilePatterns::defaults(&["**/services/**"]).matches("a/services/b.ts"));
        assert!(FilePatterns::defaults(&["[broken"]).is_empty());
    }

    #[test]
    fn invalid_glob_is_reported() {
        let err = FilePatterns::new(&["src/[icons"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGlob { pattern, .. } if pattern == "src/[icons"));
    }
}
