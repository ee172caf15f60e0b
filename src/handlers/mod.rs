//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod chat;
pub mod health;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::OpenAIClient;
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub openai_client: OpenAIClient,
}

impl AppState {
    /// Build state from loaded settings
    pub fn new(settings: Settings) -> Result<Self> {
        let openai_client = OpenAIClient::new(&settings)?;
        Ok(Self {
            settings,
            openai_client,
        })
    }
}

/// Create application router
pub fn create_router(settings: Settings) -> Result<Router> {
    let cors = create_cors_layer(&settings)?;
    let max_request_size = settings.request.max_request_size;

    let app_state = Arc::new(AppState::new(settings)?);

    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(DefaultBodyLimit::max(max_request_size));

    let router = Router::new()
        .route("/chat", post(chat::handle_chat))
        .route("/health", get(health::health_check))
        .with_state(app_state)
        .layer(middleware_stack);

    Ok(router)
}

/// Build the CORS layer from the configured origins
fn create_cors_layer(settings: &Settings) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if settings.allows_any_origin() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = settings
        .security
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(origins))
}
