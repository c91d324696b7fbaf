//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::LintelConfig;
use std::collections::BTreeSet;
use std::path::Path;

/// The configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "lintel.toml";

/// Loads and validates `lintel.toml` from a project directory.
///
/// A missing file yields the default configuration.
pub fn load_config(project_dir: &Path) -> Result<LintelConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(LintelConfig::default());
    }
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `lintel.toml` configuration from a string.
///
/// Rule names are not checked here; the lint engine rejects unknown rules
/// when it is built from the configuration.
pub fn load_config_from_str(content: &str) -> Result<LintelConfig, ConfigError> {
    let config: LintelConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Rejects a rule listed in more than one of `deny`, `allow`, and `warn`.
fn validate_config(config: &LintelConfig) -> Result<(), ConfigError> {
    let lint = &config.lint;
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for (list, entries) in [("deny", &lint.deny), ("allow", &lint.allow), ("warn", &lint.warn)] {
        let mut in_list: BTreeSet<&str> = BTreeSet::new();
        for entry in entries {
            if entry.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "empty rule name in lint.{list}"
                )));
            }
            if in_list.insert(entry.as_str()) && !seen.insert(entry.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "rule '{entry}' appears in more than one of lint.deny, lint.allow, lint.warn"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = load_config_from_str("").unwrap();
        assert!(config.lint.deny.is_empty());
        assert!(config.rules.is_empty());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[lint]
deny = ["svg-currentcolor"]
allow = ["no-nested-ternary", "W103"]
warn = []

[rules.boolean-naming]
prefixes = ["is", "has", "should"]
allowed_names = ["open", "disabled"]

[rules.svg-currentcolor]
files = ["**/icons/**", "**/*Icon.tsx"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.lint.deny, vec!["svg-currentcolor"]);
        assert_eq!(config.lint.allow.len(), 2);
        let naming = config.rule_options("boolean-naming");
        assert_eq!(
            naming.string_list("allowed_names").unwrap().unwrap(),
            vec!["open", "disabled"]
        );
        assert!(config
            .rule_options("svg-currentcolor")
            .patterns("files")
            .unwrap()
            .unwrap()
            .matches("src/icons/Check.tsx"));
    }

    #[test]
    fn conflicting_lists_rejected() {
        let toml = r#"
[lint]
deny = ["no-empty-catch"]
allow = ["no-empty-catch"]
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn duplicate_within_one_list_is_fine() {
        let toml = r#"
[lint]
allow = ["W101", "W101"]
"#;
        assert!(load_config_from_str(toml).is_ok());
    }

    #[test]
    fn unknown_top_level_table_rejected() {
        let err = load_config_from_str("[project]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn invalid_toml_rejected() {
        let err = load_config_from_str("[lint\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = std::env::temp_dir().join("lintel-config-missing-test-dir");
        let config = load_config(&dir).unwrap();
        assert!(config.lint.allow.is_empty());
    }
}
