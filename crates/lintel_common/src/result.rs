//! Common result and error types for rule callbacks.

/// The result type returned by every rule callback and fix computation.
///
/// `Err` marks an internal fault (a bug in a rule or a malformed tree the rule
/// did not expect), never a user-facing problem. User-facing problems are
/// reported as diagnostics and the callback still returns `Ok`. The engine
/// logs an `Err` and treats the callback as a no-op for that node.
pub type LintResult<T> = Result<T, InternalError>;

/// An internal fault raised inside a rule callback.
#[derive(Debug, thiserror::Error)]
#[error("internal lint error: {message}")]
pub struct InternalError {
    /// Description of the fault.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates an error describing a node that lacks a shape the caller relied on.
    pub fn malformed(what: &str, detail: impl std::fmt::Display) -> Self {
        Self::new(format!("malformed {what}: {detail}"))
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("cache poisoned");
        assert_eq!(format!("{err}"), "internal lint error: cache poisoned");
    }

    #[test]
    fn malformed_message() {
        let err = InternalError::malformed("jsx attribute", "missing name");
        assert_eq!(err.message, "malformed jsx attribute: missing name");
    }

    #[test]
    fn question_mark_propagates() {
        fn inner() -> LintResult<u32> {
            Err(InternalError::new("inner"))
        }
        fn outer() -> LintResult<u32> {
            let v = inner()?;
            Ok(v + 1)
        }
        assert_eq!(outer().unwrap_err().message, "inner");
    }

    #[test]
    fn from_string() {
        let err: InternalError = "from string".to_string().into();
        assert_eq!(err.message, "from string");
    }
}
