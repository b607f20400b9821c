//! Wire contract for the chat relay endpoint.
//!
//! The mobile clients speak camelCase JSON, so the wire structs rename
//! their fields accordingly. `message` defaults to the empty string so an
//! absent field and an empty field take the same validation path.

use serde::{Deserialize, Serialize};

/// A child's question submitted to the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Free-text question. Required; rejected when empty after trimming.
    #[serde(default)]
    pub message: String,

    /// Opaque correlation key scoping quota tracking (per-child or
    /// per-device). Absent identities are unthrottled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_id: Option<String>,
}

/// Reply returned to the caller on every successful relay outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Which stage of the relay pipeline produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Raw text from the completion provider.
    Completion,
    /// Fixed daily-limit reply from the quota guard.
    QuotaLimit,
    /// Fixed emergency reply from the safety precheck.
    Safety,
}

/// A successful relay outcome: the reply text plus the stage that produced it.
///
/// All three sources are successes at the wire level; only validation and
/// provider failures are errors.
#[derive(Debug, Clone)]
pub struct RelayReply {
    pub reply: String,
    pub source: ReplySource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_missing_message_defaults_to_empty() {
        let request: ChatRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(request.message.is_empty());
        assert!(request.identity_id.is_none());
    }

    #[test]
    fn test_chat_request_camel_case_identity() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"message":"hi","identityId":"child-1"}"#).unwrap();
        assert_eq!(request.message, "hi");
        assert_eq!(request.identity_id.as_deref(), Some("child-1"));
    }

    #[test]
    fn test_chat_request_serializes_without_absent_identity() {
        let request = ChatRequest {
            message: "hi".to_string(),
            identity_id: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"message":"hi"}"#);
    }
}
