//! Configuration types deserialized from `lintel.toml`.

use crate::error::ConfigError;
use crate::patterns::FilePatterns;
use serde::Deserialize;
use std::collections::BTreeMap;

/// The top-level configuration parsed from `lintel.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintelConfig {
    /// Rule selection and severity adjustment.
    #[serde(default)]
    pub lint: LintConfig,
    /// Per-rule option tables keyed by rule name.
    #[serde(default)]
    pub rules: BTreeMap<String, toml::Table>,
}

impl LintelConfig {
    /// Returns the options configured for `rule` (empty when absent).
    pub fn rule_options(&self, rule: &str) -> RuleOptions {
        RuleOptions {
            rule: rule.to_string(),
            table: self.rules.get(rule).cloned().unwrap_or_default(),
        }
    }
}

/// Which rules run, and at what severity.
///
/// Entries are rule names (`svg-currentcolor`) or codes (`C203`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// Rules to report as errors.
    #[serde(default)]
    pub deny: Vec<String>,
    /// Rules to disable.
    #[serde(default)]
    pub allow: Vec<String>,
    /// Rules to report as warnings even if their default is error.
    #[serde(default)]
    pub warn: Vec<String>,
}

/// The option table of one rule, with typed accessors.
///
/// Every accessor returns `Ok(None)` for a missing key and
/// [`ConfigError::InvalidOption`] for a key of the wrong type.
#[derive(Debug, Clone, Default)]
pub struct RuleOptions {
    rule: String,
    table: toml::Table,
}

impl RuleOptions {
    /// Creates an option table for `rule`.
    pub fn new(rule: impl Into<String>, table: toml::Table) -> Self {
        Self {
            rule: rule.into(),
            table,
        }
    }

    /// Returns the rule these options belong to.
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Returns `true` if no options are set.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Fails on any key not listed in `known`.
    pub fn check_keys(&self, known: &[&str]) -> Result<(), ConfigError> {
        match self.table.keys().find(|k| !known.contains(&k.as_str())) {
            Some(key) => Err(self.invalid(key, "unknown option")),
            None => Ok(()),
        }
    }

    /// Reads an array of strings.
    pub fn string_list(&self, key: &str) -> Result<Option<Vec<String>>, ConfigError> {
        let Some(value) = self.table.get(key) else {
            return Ok(None);
        };
        let items = value
            .as_array()
            .ok_or_else(|| self.invalid(key, "expected an array of strings"))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.invalid(key, "expected an array of strings"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Reads an array of globs and compiles it.
    pub fn patterns(&self, key: &str) -> Result<Option<FilePatterns>, ConfigError> {
        match self.string_list(key)? {
            None => Ok(None),
            Some(list) => FilePatterns::new(&list).map(Some),
        }
    }

    fn invalid(&self, key: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidOption {
            rule: self.rule.clone(),
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(src: &str) -> RuleOptions {
        RuleOptions::new("boolean-naming", src.parse::<toml::Table>().unwrap())
    }

    #[test]
    fn string_list_reads_and_validates() {
        let opts = options(r#"prefixes = ["is", "has"]"#);
        assert_eq!(
            opts.string_list("prefixes").unwrap(),
            Some(vec!["is".to_string(), "has".to_string()])
        );
        assert_eq!(opts.string_list("allowed_names").unwrap(), None);

        let bad = options(r#"prefixes = ["is", 3]"#);
        assert!(matches!(
            bad.string_list("prefixes"),
            Err(ConfigError::InvalidOption { key, .. }) if key == "prefixes"
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let opts = options(r#"prefix = ["is"]"#);
        let err = opts.check_keys(&["prefixes", "allowed_names"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid option 'prefix' for rule 'boolean-naming': unknown option"
        );
    }

    #[test]
    fn patterns_compile() {
        let opts = options(r#"files = ["**/services/**"]"#);
        let p = opts.patterns("files").unwrap().unwrap();
        assert!(p.matches("src/services/api.ts"));
    }

    #[test]
    fn missing_rule_table_is_empty() {
        let config = LintelConfig::default();
        let opts = config.rule_options("svg-currentcolor");
        assert!(opts.is_empty());
        assert_eq!(opts.rule(), "svg-currentcolor");
    }
}
