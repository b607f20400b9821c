//! Application error type mapping to the relay's fixed wire shapes.
//!
//! The contract has exactly two failure shapes:
//! - 400 `{ "error": "..." }` for validation failures (no reply field)
//! - 500 `{ "error": "...", "reply": "..." }` for provider/store failures,
//!   where `reply` is the fixed user-safe fallback so the caller never has
//!   to synthesize its own failure text
//!
//! Quota-exhaustion and safety triggers never reach this type -- they are
//! 200 responses with a reply.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    /// Malformed input; reported without a reply and never retried.
    Validation(String),
    /// Provider or store failure converted to the fixed fallback reply.
    Failure { error: String, reply: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Failure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wire body for this error.
    pub fn body(&self) -> serde_json::Value {
        match self {
            AppError::Validation(message) => json!({ "error": message }),
            AppError::Failure { error, reply } => json!({ "error": error, "reply": reply }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            self.body().to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_body_has_no_reply_field() {
        let err = AppError::Validation("message must not be empty".to_string());
        let body = err.body();
        assert_eq!(body["error"], "message must not be empty");
        assert!(body.get("reply").is_none());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_failure_body_carries_fallback_reply() {
        let err = AppError::Failure {
            error: "completion provider request failed".to_string(),
            reply: "I can't think of an answer right now.".to_string(),
        };
        let body = err.body();
        assert_eq!(body["error"], "completion provider request failed");
        assert_eq!(body["reply"], "I can't think of an answer right now.");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
