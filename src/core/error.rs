//! Custom error types for Stepscribe
//!
//! Classification, parsing and generation never fail. Errors only come from
//! the edges: configuration, file output and the CLI validation gate.

use thiserror::Error;

/// Main error type for Stepscribe operations
#[derive(Error, Debug)]
pub enum StepscribeError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configured CSS selector could not be compiled
    #[error("Invalid markup selector: {0}")]
    Selector(String),

    /// Test case rejected by the validator
    #[error("Invalid test case: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for Stepscribe operations
pub type Result<T> = std::result::Result<T, StepscribeError>;

impl StepscribeError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a selector error
    pub fn selector(msg: impl Into<String>) -> Self {
        Self::Selector(msg.into())
    }

    /// Wrap an error with additional context
    pub fn with_context<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_joins_errors() {
        let err = StepscribeError::Validation(vec![
            "Test case must have a title".to_string(),
            "Test case must have at least one step".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid test case: Test case must have a title; Test case must have at least one step"
        );
    }

    #[test]
    fn test_with_context() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StepscribeError::with_context("Failed to write login.spec.js", io);
        assert_eq!(err.to_string(), "Failed to write login.spec.js: denied");
    }
}
