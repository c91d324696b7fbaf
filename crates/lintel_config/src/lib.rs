//! Loading and validation of `lintel.toml`.
//!
//! The file has a `[lint]` table selecting which rules run and at what
//! severity, and one `[rules.<name>]` table per rule carrying that rule's
//! options. Options stay loosely typed here ([`RuleOptions`]); each rule reads
//! and validates its own keys when the engine is built.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod patterns;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use patterns::FilePatterns;
pub use types::{LintConfig, LintelConfig, RuleOptions};
