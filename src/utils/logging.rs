//! Logging utilities
//!
//! Subscriber setup and log-safe request summaries

use crate::config::settings::LoggingConfig;
use crate::models::openai::OpenAIRequest;
use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level: {}", config.level))?;

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        // Human readable format (development environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    tracing::info!("Logging system initialized");
    Ok(())
}

/// Summary of an upstream request for logging
///
/// Message contents are never included, only their count and roles.
pub fn create_request_log_summary(request: &OpenAIRequest) -> serde_json::Value {
    let roles: Vec<&str> = request
        .messages
        .iter()
        .map(|m| m.get("role").and_then(|r| r.as_str()).unwrap_or("?"))
        .collect();

    serde_json::json!({
        "model": request.model,
        "max_tokens": request.max_tokens,
        "message_count": request.messages.len(),
        "roles": roles,
    })
}
