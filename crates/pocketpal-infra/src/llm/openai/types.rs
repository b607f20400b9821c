//! OpenAI Chat Completions API types.
//!
//! These are provider-specific request/response structures for HTTP
//! communication with the `/v1/chat/completions` endpoint. They are NOT
//! the generic completion types from pocketpal-types -- those stay
//! provider-agnostic.

use serde::{Deserialize, Serialize};

/// Request body for the Chat Completions API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionBody {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// A single message in a chat completion conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Response body for a non-streaming chat completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub model: String,
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    /// Absent for refusals and tool calls; the provider treats both as
    /// "no usable text".
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_skips_absent_temperature() {
        let body = ChatCompletionBody {
            model: "gpt-4o-mini".to_string(),
            messages: Vec::new(),
            max_tokens: 200,
            temperature: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn test_response_parses_missing_content() {
        let json = r#"{"model":"gpt-4o-mini","choices":[{"message":{"refusal":"no"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }
}
