//! OpenAI API data models
//!
//! Upstream request body and error structures

use super::chat::ChatRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OpenAI chat completion request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenAIRequest {
    /// Model name
    pub model: Value,
    /// Message list, passed through untouched
    pub messages: Vec<Value>,
    /// Maximum tokens to generate
    pub max_tokens: Value,
}

impl From<ChatRequest> for OpenAIRequest {
    fn from(request: ChatRequest) -> Self {
        Self {
            model: request.model,
            messages: request.messages,
            max_tokens: request.max_tokens,
        }
    }
}

/// OpenAI error response
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIErrorResponse {
    pub error: OpenAIError,
}

/// OpenAI error detail
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIError {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<Value>,
}

impl OpenAIErrorResponse {
    /// Parse a structured error body and return its message, if any
    pub fn extract_message(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|response| response.error.message)
    }
}
