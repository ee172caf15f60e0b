//! Chat relay handler
//!
//! Validates the client request, attaches the server-held key and forwards it to OpenAI

use crate::handlers::AppState;
use crate::models::chat::{ChatRequest, ChatResponse};
use crate::models::openai::OpenAIRequest;
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::create_request_log_summary;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Handle chat requests
///
/// POST /chat
///
/// The key check runs before the body is looked at, so a missing key yields 500 for any input.
pub async fn handle_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let api_key = state
        .settings
        .openai
        .api_key
        .as_ref()
        .ok_or_else(|| AppError::Configuration("OPENAI_API_KEY not configured".to_string()))?;

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(AppError::PayloadTooLarge);
        }
        Err(rejection) => {
            // Unparsable bodies get the same answer as bodies without `messages`
            warn!("Rejected chat request body: {}", rejection.body_text());
            Value::Null
        }
    };

    let openai_request = OpenAIRequest::from(ChatRequest::from_value(body)?);

    if let Ok(summary) = serde_json::to_string(&create_request_log_summary(&openai_request)) {
        debug!("Forwarding chat request: {}", summary);
    }

    let completion = state
        .openai_client
        .chat_completions(api_key, &openai_request)
        .await?;

    let response = ChatResponse::from_completion(&completion).ok_or(AppError::EmptyResponse)?;

    info!("Chat request completed ({} chars)", response.content.len());
    Ok(Json(response))
}
