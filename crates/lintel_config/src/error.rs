//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating a `lintel.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A rule name or code in `[lint]` or `[rules]` is not registered.
    #[error("unknown rule '{0}'")]
    UnknownRule(String),

    /// A rule option has the wrong type or an unsupported value.
    #[error("invalid option '{key}' for rule '{rule}': {reason}")]
    InvalidOption {
        /// The rule the option belongs to.
        rule: String,
        /// The option key.
        key: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A file-activation pattern is not a valid glob.
    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob {
        /// The offending pattern.
        pattern: String,
        /// The glob compiler's message.
        reason: String,
    },

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}
