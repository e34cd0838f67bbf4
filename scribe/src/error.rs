//! Unified error types for the scribe crate.
//!
//! Every fallible operation returns [`Result`]. Transport and decoding
//! failures are classified into [`LlmError`] at the provider boundary.

pub use crate::llms::error::LlmError;

/// Result type alias for scribe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the scribe crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Remote model error.
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl Error {
    /// Returns the remote model error, if this is one.
    #[must_use]
    pub const fn as_llm(&self) -> Option<&LlmError> {
        match self {
            Self::Llm(err) => Some(err),
        }
    }

    /// Check if a caller may reasonably retry the failed call.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Llm(err) => err.is_retryable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_converts() {
        let err: Error = LlmError::network("connection reset").into();
        assert!(matches!(err, Error::Llm(LlmError::Network(_))));
        assert_eq!(err.to_string(), "LLM error: connection reset");
    }

    #[test]
    fn test_as_llm_exposes_kind() {
        let err: Error = LlmError::blocked("SAFETY").into();
        assert_eq!(err.as_llm(), Some(&LlmError::blocked("SAFETY")));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_rate_limit_is_retryable() {
        let err: Error = LlmError::rate_limited("gemini", "quota").into();
        assert!(err.is_retryable());
    }
}
