//! Relay orchestrator sequencing the safety-gated chat pipeline.
//!
//! Pipeline order: validate -> safety precheck -> quota reserve ->
//! completion -> confirm (keep the reservation) or release + error.
//!
//! The safety precheck runs BEFORE the quota guard: a quota-exhausted
//! child reporting distress must still receive the safety reply, never the
//! generic limit message. Safety triggers therefore consume no quota.
//!
//! Generic over [`CompletionProvider`] and [`QuotaStore`] so pocketpal-core
//! never depends on pocketpal-infra.

use std::sync::Arc;

use tracing::{info, warn};

use pocketpal_types::chat::{ChatRequest, RelayReply, ReplySource};
use pocketpal_types::config::RelayConfig;
use pocketpal_types::error::RelayError;
use pocketpal_types::llm::{CompletionRequest, Message, MessageRole};

use crate::llm::provider::CompletionProvider;
use crate::quota::guard::{QuotaDecision, QuotaGuard};
use crate::quota::store::QuotaStore;
use crate::safety::SafetyPrecheck;

/// Sequences quota, safety, and completion into one request/response
/// contract.
pub struct RelayService<P: CompletionProvider, S: QuotaStore> {
    provider: P,
    guard: QuotaGuard<S>,
    precheck: SafetyPrecheck,
    config: Arc<RelayConfig>,
}

impl<P: CompletionProvider, S: QuotaStore> RelayService<P, S> {
    pub fn new(provider: P, store: S, config: Arc<RelayConfig>) -> Self {
        let guard = QuotaGuard::new(store, config.daily_message_limit);
        let precheck = SafetyPrecheck::new(&config.emergency_keywords);
        Self {
            provider,
            guard,
            precheck,
            config,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Handle one chat request end to end.
    ///
    /// Returns a [`RelayReply`] for the three successful outcomes
    /// (completion, limit, safety) and an error for malformed input or a
    /// failed provider/store call. Only successful completions consume
    /// quota: limit and safety replies never reach the reservation, and a
    /// failed completion rolls its reservation back.
    pub async fn handle(&self, request: &ChatRequest) -> Result<RelayReply, RelayError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(RelayError::EmptyMessage);
        }
        let identity_id = request.identity_id.as_deref();

        if self.precheck.triggered(message) {
            info!(identity_id, "safety precheck triggered, returning emergency reply");
            return Ok(RelayReply {
                reply: self.config.safety_reply.clone(),
                source: ReplySource::Safety,
            });
        }

        let reservation = match self.guard.try_reserve(identity_id).await? {
            QuotaDecision::Allowed(reservation) => reservation,
            QuotaDecision::Limited => {
                info!(identity_id, "daily limit reached, returning limit reply");
                return Ok(RelayReply {
                    reply: self.config.limit_reply.clone(),
                    source: ReplySource::QuotaLimit,
                });
            }
        };

        match self.provider.complete(&self.build_request(message)).await {
            Ok(response) => Ok(RelayReply {
                reply: response.content,
                source: ReplySource::Completion,
            }),
            Err(err) => {
                warn!(identity_id, provider = self.provider.name(), error = %err,
                    "completion failed, rolling back quota reservation");
                if let Err(release_err) = self.guard.release(&reservation).await {
                    warn!(error = %release_err, "quota rollback failed");
                }
                Err(RelayError::Completion(err))
            }
        }
    }

    fn build_request(&self, message: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![Message {
                role: MessageRole::User,
                content: message.to_string(),
            }],
            system: Some(self.config.system_prompt.clone()),
            max_tokens: self.config.max_completion_tokens,
            temperature: Some(self.config.temperature),
        }
    }
}
