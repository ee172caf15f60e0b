//! Relay API data models
//!
//! Client-facing request and response structures for `POST /chat`

use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Model used when the client omits `model`
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Token limit used when the client omits `max_tokens`
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Content returned when the assistant message is empty
pub const EMPTY_CONTENT_PLACEHOLDER: &str = "No response.";

/// Validated chat request
///
/// `model` and `max_tokens` are forwarded verbatim when present, whatever their JSON type.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Non-empty message list
    pub messages: Vec<Value>,
    /// Model identifier
    pub model: Value,
    /// Maximum tokens to generate
    pub max_tokens: Value,
}

impl ChatRequest {
    /// Validate a raw JSON body and apply defaults
    pub fn from_value(body: Value) -> AppResult<Self> {
        let mut body = match body {
            Value::Object(map) if map.contains_key("messages") => map,
            _ => {
                return Err(AppError::Validation(
                    "Request body must include 'messages' array".to_string(),
                ))
            }
        };

        let messages = match body.remove("messages") {
            Some(Value::Array(messages)) if !messages.is_empty() => messages,
            _ => {
                return Err(AppError::Validation(
                    "'messages' must be a non-empty array".to_string(),
                ))
            }
        };

        Ok(Self {
            messages,
            model: body
                .remove("model")
                .unwrap_or_else(|| Value::String(DEFAULT_MODEL.to_string())),
            max_tokens: body
                .remove("max_tokens")
                .unwrap_or_else(|| Value::from(DEFAULT_MAX_TOKENS)),
        })
    }
}

/// Successful relay response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    /// Trimmed assistant text
    pub content: String,
    /// Raw assistant message as returned upstream
    pub message: Value,
}

impl ChatResponse {
    /// Build a response from an upstream assistant message
    pub fn from_message(message: Value) -> Self {
        let content = message
            .get("content")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(EMPTY_CONTENT_PLACEHOLDER)
            .to_string();

        Self { content, message }
    }

    /// Extract the first choice from an upstream completion body
    ///
    /// Returns `None` when `choices` is missing, not an array, or empty.
    pub fn from_completion(completion: &Value) -> Option<Self> {
        let first = completion.get("choices")?.as_array()?.first()?;
        let message = first
            .get("message")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        Some(Self::from_message(message))
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
}
