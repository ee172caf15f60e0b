//! Services module
//!
//! Contains the upstream HTTP client

pub mod client;

pub use client::OpenAIClient;
