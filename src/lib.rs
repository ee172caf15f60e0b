//! Chat Relay Library
//!
//! Forwards chat requests to the OpenAI chat completion API while keeping the API key server-side

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{create_router, AppState};
pub use models::{ChatRequest, ChatResponse, ErrorResponse};
pub use services::OpenAIClient;
pub use utils::error::{AppError, AppResult, UpstreamError};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
