//! HTTP client service
//!
//! Encapsulates HTTP communication with the OpenAI API

use crate::config::{ApiKey, Settings};
use crate::models::openai::{OpenAIErrorResponse, OpenAIRequest};
use crate::utils::error::UpstreamError;
use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

/// OpenAI API client
///
/// Holds no credential; the key is passed per call from the application state.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    url: String,
    timeout_secs: u64,
}

impl OpenAIClient {
    /// Create a new client instance
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.openai.timeout))
            .user_agent(concat!("chatrelay/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: settings.chat_completions_url(),
            timeout_secs: settings.openai.timeout,
        })
    }

    /// Upstream endpoint this client posts to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send a chat completion request
    ///
    /// Exactly one attempt is made. On success the raw JSON body is returned.
    pub async fn chat_completions(
        &self,
        api_key: &ApiKey,
        request: &OpenAIRequest,
    ) -> Result<Value, UpstreamError> {
        debug!("Sending OpenAI chat completion request");

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", api_key.expose()))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.handle_response(response).await
    }

    /// Handle HTTP response
    async fn handle_response(&self, response: Response) -> Result<Value, UpstreamError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if status.is_success() {
            let value = serde_json::from_str(&body).map_err(|e| {
                error!("OpenAI returned an undecodable body: {}", e);
                UpstreamError::Decode(e.to_string())
            })?;

            debug!("OpenAI request completed successfully");
            Ok(value)
        } else {
            let message = extract_error_message(status, &body);
            error!("OpenAI API request failed: {} - {}", status, message);
            Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            error!("OpenAI request timed out after {}s", self.timeout_secs);
            UpstreamError::Timeout(self.timeout_secs)
        } else {
            error!("OpenAI request failed: {}", err);
            UpstreamError::Transport(err.to_string())
        }
    }
}

/// Pick the most useful message from a failed upstream response
///
/// Structured `{"error": {"message": ...}}` first, then the raw body, then the status line.
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Some(message) = OpenAIErrorResponse::extract_message(body) {
        return message;
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    format!("OpenAI API request failed with status {}", status)
}
