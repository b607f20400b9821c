use thiserror::Error;

use crate::llm::CompletionError;

/// Errors from quota store operations (used by trait definitions in
/// pocketpal-core).
///
/// The in-memory store never fails; the variants exist for external store
/// implementations behind the same trait.
#[derive(Debug, Error)]
pub enum QuotaError {
    #[error("quota store unavailable")]
    Unavailable,

    #[error("quota store error: {0}")]
    Store(String),
}

/// Errors from the relay orchestrator.
///
/// Quota exhaustion and safety triggers are NOT errors -- they are
/// intentional short-circuit replies. Only malformed input, provider
/// failures, and store failures surface here.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("message must not be empty")]
    EmptyMessage,

    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("quota check failed: {0}")]
    Quota(#[from] QuotaError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_error_display() {
        let err = QuotaError::Store("connection reset".to_string());
        assert_eq!(err.to_string(), "quota store error: connection reset");
    }

    #[test]
    fn test_relay_error_wraps_completion_error() {
        let err = RelayError::from(CompletionError::MissingCredential);
        assert!(err.to_string().contains("no provider credential"));
    }

    #[test]
    fn test_relay_error_empty_message_display() {
        assert_eq!(
            RelayError::EmptyMessage.to_string(),
            "message must not be empty"
        );
    }
}
