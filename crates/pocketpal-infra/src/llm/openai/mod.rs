//! OpenAiProvider -- concrete [`CompletionProvider`] for OpenAI-compatible
//! chat completion endpoints.
//!
//! Sends a single non-streaming request to `/v1/chat/completions` with
//! bearer authentication. The API key is wrapped in
//! [`secrecy::SecretString`] and is never logged or included in `Debug`
//! output. A missing key does not prevent construction; every call then
//! fails with a credential error that the orchestrator converts to the
//! fixed fallback reply.

pub mod types;

use secrecy::{ExposeSecret, SecretString};

use pocketpal_core::llm::provider::CompletionProvider;
use pocketpal_types::llm::{
    CompletionError, CompletionRequest, CompletionResponse, MessageRole,
};

use self::types::{ChatCompletionBody, ChatCompletionResponse, ChatMessage};

/// OpenAI-compatible completion provider.
///
/// # API Key Security
///
/// Does NOT derive Debug: the `SecretString` field already guards the key,
/// and omitting Debug entirely removes the remaining surface.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
}

impl OpenAiProvider {
    const DEFAULT_BASE_URL: &'static str = "https://api.openai.com";

    /// Create a provider with an optional credential.
    pub fn new(api_key: Option<SecretString>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a provider reading the credential from the environment.
    pub fn from_env() -> Self {
        Self::new(crate::secret::provider_api_key())
    }

    /// Override the base URL (testing and proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Whether a credential is configured (for startup diagnostics).
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a generic [`CompletionRequest`] into the wire body. The
    /// system instruction becomes the leading `system` message.
    fn to_chat_body(request: &CompletionRequest) -> ChatCompletionBody {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: MessageRole::System.to_string(),
                content: system.clone(),
            });
        }
        messages.extend(request.messages.iter().map(|m| ChatMessage {
            role: m.role.to_string(),
            content: m.content.clone(),
        }));

        ChatCompletionBody {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let Some(api_key) = &self.api_key else {
            return Err(CompletionError::MissingCredential);
        };

        let body = Self::to_chat_body(request);
        let response = self
            .client
            .post(self.url("/v1/chat/completions"))
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => CompletionError::AuthenticationFailed,
                429 => CompletionError::RateLimited,
                _ => CompletionError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Deserialization(format!("failed to parse response: {e}")))?;

        let content = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(CompletionError::EmptyCompletion);
        }

        Ok(CompletionResponse {
            content: content.to_string(),
            model: completion.model,
        })
    }
}
