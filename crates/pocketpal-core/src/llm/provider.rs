//! CompletionProvider trait definition.
//!
//! The single abstraction over the external text-completion backend. The
//! relay performs exactly one non-streaming completion per request, with
//! no retries; a failed call surfaces as a [`CompletionError`].

use pocketpal_types::llm::{CompletionError, CompletionRequest, CompletionResponse};

/// Trait for completion provider backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in pocketpal-infra (e.g., `OpenAiProvider`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, CompletionError>> + Send;
}
