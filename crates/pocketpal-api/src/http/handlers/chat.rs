//! Chat relay endpoint.
//!
//! POST /api/v1/chat
//!
//! Runs the relay pipeline (validate -> safety precheck -> quota reserve ->
//! completion) and maps the outcome onto the fixed wire shapes. All three
//! short-circuit replies are 200s; only validation and provider failures
//! become error responses. Callers normalize the `reply` field themselves.

use axum::extract::State;
use axum::Json;
use tracing::{error, info_span, Instrument};
use uuid::Uuid;

use pocketpal_types::chat::{ChatRequest, ChatResponse};
use pocketpal_types::error::RelayError;

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/v1/chat -- relay one question to the completion provider.
pub async fn relay_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let config = &state.config;
    // OTel GenAI semantic-convention fields, same as the provider spans.
    let span = info_span!(
        "gen_ai.chat",
        request_id = %Uuid::now_v7(),
        gen_ai.system = "openai",
        gen_ai.request.model = %config.model,
        gen_ai.request.max_tokens = config.max_completion_tokens,
        gen_ai.request.temperature = config.temperature,
    );

    match state.relay.handle(&request).instrument(span).await {
        Ok(outcome) => Ok(Json(ChatResponse {
            reply: outcome.reply,
        })),
        Err(RelayError::EmptyMessage) => {
            Err(AppError::Validation(RelayError::EmptyMessage.to_string()))
        }
        Err(err @ RelayError::Completion(_)) => {
            error!(error = %err, "relay request failed at the provider");
            Err(AppError::Failure {
                error: "completion provider request failed".to_string(),
                reply: config.fallback_reply.clone(),
            })
        }
        Err(err @ RelayError::Quota(_)) => {
            error!(error = %err, "relay request failed at the quota store");
            Err(AppError::Failure {
                error: "quota check failed".to_string(),
                reply: config.fallback_reply.clone(),
            })
        }
    }
}
