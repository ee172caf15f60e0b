//! Logging middleware
//!
//! Records HTTP request and response information

use axum::{
    extract::Request,
    http::{Method, Uri},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Requests slower than this are reported
const SLOW_REQUEST_SECS: u64 = 5;

/// Request logging middleware
///
/// Wraps each request in a span carrying a fresh request id. Bodies and headers are not logged.
pub async fn request_logging_middleware(
    method: Method,
    uri: Uri,
    request: Request,
    next: Next,
) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
    );

    async move {
        let start_time = Instant::now();
        info!("Request started: {} {}", method, uri.path());

        let response = next.run(request).await;

        let duration = start_time.elapsed();
        let status = response.status();
        let millis = duration.as_secs_f64() * 1000.0;

        if status.is_server_error() {
            warn!("Server error: {} - Duration: {:.2}ms", status, millis);
        } else if status.is_client_error() {
            warn!("Client error: {} - Duration: {:.2}ms", status, millis);
        } else {
            info!("Request completed: {} - Duration: {:.2}ms", status, millis);
        }

        if duration.as_secs() > SLOW_REQUEST_SECS {
            warn!(
                "Slow request detected: {} {} - Duration: {:.2}s",
                method,
                uri.path(),
                duration.as_secs_f64()
            );
        }

        response
    }
    .instrument(span)
    .await
}
