//! Data models module
//!
//! Defines the relay's client-facing structures and the upstream OpenAI structures

pub mod chat;
pub mod openai;

pub use chat::{ChatRequest, ChatResponse, ErrorResponse};
pub use openai::OpenAIRequest;
