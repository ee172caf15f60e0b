//! Error handling module unit tests

use axum::http::StatusCode;
use axum::response::IntoResponse;
use chatrelay::utils::error::*;
use serde_json::{json, Value};

async fn render(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[test]
fn test_app_error_status_codes() {
    let test_cases = vec![
        (AppError::Configuration("test".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        (AppError::Validation("test".to_string()), StatusCode::BAD_REQUEST),
        (AppError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
        (AppError::Upstream("test".to_string()), StatusCode::BAD_GATEWAY),
        (AppError::EmptyResponse, StatusCode::BAD_GATEWAY),
    ];

    for (error, expected_status) in test_cases {
        assert_eq!(error.status_code(), expected_status);
    }
}

#[test]
fn test_app_error_types() {
    let test_cases = vec![
        (AppError::Configuration("test".to_string()), "configuration_error"),
        (AppError::Validation("test".to_string()), "invalid_request_error"),
        (AppError::PayloadTooLarge, "invalid_request_error"),
        (AppError::Upstream("test".to_string()), "upstream_error"),
        (AppError::EmptyResponse, "upstream_shape_error"),
    ];

    for (error, expected_type) in test_cases {
        assert_eq!(error.error_type(), expected_type);
    }
}

#[test]
fn test_upstream_error_messages() {
    let transport = UpstreamError::Transport("connection refused".to_string());
    assert_eq!(transport.to_string(), "connection refused");

    let status = UpstreamError::Status {
        status: 429,
        message: "Rate limit reached".to_string(),
    };
    assert_eq!(status.to_string(), "Rate limit reached");

    let decode = UpstreamError::Decode("expected value at line 1 column 1".to_string());
    assert_eq!(
        decode.to_string(),
        "Failed to parse upstream response: expected value at line 1 column 1"
    );
}

#[tokio::test]
async fn test_configuration_error_response() {
    let (status, body) = render(AppError::Configuration("OPENAI_API_KEY not configured".to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "OPENAI_API_KEY not configured"}));
}

#[tokio::test]
async fn test_upstream_error_response() {
    let error: AppError = UpstreamError::Status {
        status: 400,
        message: "X".to_string(),
    }
    .into();
    let (status, body) = render(error).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": "X"}));
}

#[tokio::test]
async fn test_empty_response_error_response() {
    let (status, body) = render(AppError::EmptyResponse).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": EMPTY_RESPONSE_MESSAGE}));
}
