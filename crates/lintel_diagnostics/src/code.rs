//! Rule codes: a category letter plus a three-digit number (`C203`).

use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of a rule code, determining its prefix letter and default severity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Code that is wrong at runtime, prefixed with `E`.
    Error,
    /// Code that works but invites bugs, prefixed with `W`.
    Warning,
    /// Project conventions, prefixed with `C`.
    Convention,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Convention => 'C',
        }
    }

    /// Returns the category for a prefix letter.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'E' => Some(Category::Error),
            'W' => Some(Category::Warning),
            'C' => Some(Category::Convention),
            _ => None,
        }
    }

    /// Returns the severity a rule of this category reports at unless configured otherwise.
    pub fn default_severity(self) -> Severity {
        match self {
            Category::Error => Severity::Error,
            Category::Warning | Category::Convention => Severity::Warning,
        }
    }
}

/// A rule code combining a category prefix and a numeric identifier.
///
/// Displayed as the prefix followed by a zero-padded 3-digit number, e.g.
/// `E101`, `W104`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this code.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

impl FromStr for DiagnosticCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let category = chars
            .next()
            .and_then(Category::from_prefix)
            .ok_or_else(|| format!("invalid code prefix in '{s}'"))?;
        let digits = chars.as_str();
        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("expected three digits after prefix in '{s}'"));
        }
        let number = digits
            .parse()
            .map_err(|_| format!("invalid code number in '{s}'"))?;
        Ok(Self::new(category, number))
    }
}
