//! Error handling module
//!
//! Defines error types and handling logic used in the project

use crate::models::chat::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Message returned when the upstream reply carries no choices
pub const EMPTY_RESPONSE_MESSAGE: &str = "No response from OpenAI";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Server-side configuration is missing
    #[error("{0}")]
    Configuration(String),

    /// Request validation failed
    #[error("{0}")]
    Validation(String),

    /// Upstream call failed
    #[error("{0}")]
    Upstream(String),

    /// Upstream succeeded but returned no choices
    #[error("No response from OpenAI")]
    EmptyResponse,

    /// Request body exceeds the configured limit
    #[error("Payload too large")]
    PayloadTooLarge,
}

/// Failure of a single upstream call
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Connection or protocol failure before a response arrived
    #[error("{0}")]
    Transport(String),

    /// No response within the configured timeout
    #[error("Upstream request timed out after {0}s")]
    Timeout(u64),

    /// Non-2xx response; `message` is already extracted from the body
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body is not valid JSON
    #[error("Failed to parse upstream response: {0}")]
    Decode(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Upstream(_) | AppError::EmptyResponse => StatusCode::BAD_GATEWAY,
        }
    }

    /// Get error type string, used in logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "configuration_error",
            AppError::Validation(_) | AppError::PayloadTooLarge => "invalid_request_error",
            AppError::Upstream(_) => "upstream_error",
            AppError::EmptyResponse => "upstream_shape_error",
        }
    }

    /// Convert to the `{"error": ...}` body
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Application error: {} ({}) - Status code: {}", self, self.error_type(), status);
        } else {
            tracing::warn!("Client error: {} ({}) - Status code: {}", self, self.error_type(), status);
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
