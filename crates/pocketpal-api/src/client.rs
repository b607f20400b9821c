//! Caller-side relay client.
//!
//! Posts a question to the relay and applies the content normalizer to the
//! `reply` of every response, including the fixed fallback reply that
//! accompanies a provider failure. Transport failures (relay unreachable)
//! are a distinct condition from everything else: there is no `reply`
//! field to fall back on, so the caller gets an error instead of text.

use reqwest::StatusCode;
use thiserror::Error;

use pocketpal_core::normalize::Normalizer;
use pocketpal_types::chat::ChatRequest;
use pocketpal_types::config::RelayConfig;

/// Errors from talking to the relay. Quota and safety replies are not
/// errors -- they arrive as ordinary replies.
#[derive(Debug, Error)]
pub enum ChatClientError {
    #[error("relay unreachable: {0}")]
    Unreachable(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("unexpected relay response: {0}")]
    Malformed(String),
}

/// HTTP client for the relay with built-in reply normalization.
pub struct RelayClient {
    http: reqwest::Client,
    base_url: String,
    normalizer: Normalizer,
}

impl RelayClient {
    /// The normalizer tables come from the same config the relay uses.
    pub fn new(base_url: impl Into<String>, config: &RelayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            normalizer: Normalizer::from_config(config),
        }
    }

    /// Send one question and return the normalized reply text.
    ///
    /// Any response carrying a `reply` field -- completion, limit, safety,
    /// or the 500 fallback -- is normalized and returned as `Ok`.
    pub async fn ask(
        &self,
        message: &str,
        identity_id: Option<&str>,
    ) -> Result<String, ChatClientError> {
        let request = ChatRequest {
            message: message.to_string(),
            identity_id: identity_id.map(str::to_string),
        };

        let response = self
            .http
            .post(format!("{}/api/v1/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatClientError::Unreachable(e.to_string()))?;

        let status = response.status();
        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ChatClientError::Malformed(e.to_string()))?;

        if status == StatusCode::BAD_REQUEST {
            let message = payload
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("invalid request");
            return Err(ChatClientError::Rejected(message.to_string()));
        }

        match payload.get("reply").and_then(|v| v.as_str()) {
            Some(reply) => Ok(self.normalizer.normalize(reply)),
            None => Err(ChatClientError::Malformed(format!(
                "status {status} with no reply field"
            ))),
        }
    }
}
