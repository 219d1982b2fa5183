//! Error types for the strategy layer.

use thiserror::Error;

/// Result type for strategy operations.
pub type StrategyResult<T> = Result<T, StrategyError>;

/// Errors surfaced by request generation.
///
/// A gated-off poll, a released status provider or an idle generator are
/// all `Ok(None)` outcomes, never errors. The gate itself does not fail;
/// these variants originate in specialization hooks and propagate to the
/// scheduler unchanged, which owns retry/backoff policy.
#[derive(Error, Debug)]
pub enum StrategyError {
    /// A specialization failed while building a request.
    #[error("request generation failed: {message}")]
    Generation {
        /// Error message.
        message: String,
        /// Whether polling again later may succeed.
        retryable: bool,
    },

    /// Required data for a request was missing from the persistence context.
    #[error("missing data: {0}")]
    MissingData(String),
}

impl StrategyError {
    /// Creates a retryable generation error.
    pub fn generation_retryable(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable generation error.
    pub fn generation_fatal(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if polling again later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            StrategyError::Generation { retryable, .. } => *retryable,
            StrategyError::MissingData(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(StrategyError::generation_retryable("key material not ready").is_retryable());
        assert!(!StrategyError::generation_fatal("malformed payload").is_retryable());
        assert!(!StrategyError::MissingData("self user".into()).is_retryable());
    }

    #[test]
    fn error_display() {
        let err = StrategyError::generation_fatal("malformed payload");
        assert_eq!(err.to_string(), "request generation failed: malformed payload");

        let err = StrategyError::MissingData("self user".into());
        assert_eq!(err.to_string(), "missing data: self user");
    }
}
