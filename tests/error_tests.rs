// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use strava_relay::error::AppError;

#[test]
fn test_is_credential_error_matches() {
    assert!(AppError::UpstreamAuth("Token refresh failed".to_string()).is_credential_error());
    assert!(AppError::UpstreamUnauthorized.is_credential_error());
    assert!(AppError::ReauthorizationRequired.is_credential_error());
}

#[test]
fn test_is_credential_error_no_match() {
    assert!(!AppError::UpstreamFetch("HTTP 500".to_string()).is_credential_error());
    assert!(!AppError::DownstreamDispatch("HTTP 404".to_string()).is_credential_error());
    assert!(!AppError::Store("timeout".to_string()).is_credential_error());
    assert!(!AppError::ValidationFailure.is_credential_error());
}

#[tokio::test]
async fn test_validation_failure_is_plain_forbidden() {
    let response = AppError::ValidationFailure.into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    assert_eq!(&body[..], b"Forbidden");
}

#[tokio::test]
async fn test_upstream_errors_are_bad_gateway_json() {
    let response = AppError::UpstreamFetch("HTTP 503".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "strava_error");
    assert_eq!(json["details"], "HTTP 503");
}
