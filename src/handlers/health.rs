//! Health check handler

use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Health check response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Liveness check
///
/// GET /health
/// Always `{"status": "ok"}`, whether or not the upstream key is configured
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Executing health check");

    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
