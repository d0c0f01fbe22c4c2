// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
///
/// Only the subscription handshake ever returns one of these to a client;
/// the event path logs and degrades instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad webhook handshake (wrong mode or verify token).
    #[error("Webhook verification failed")]
    ValidationFailure,

    /// The refresh-token exchange was rejected, or a refreshed token was
    /// rejected again.
    #[error("Strava authorization failed: {0}")]
    UpstreamAuth(String),

    /// Strava answered a resource fetch with 401.
    #[error("Strava rejected the access token")]
    UpstreamUnauthorized,

    /// Any other failure while fetching from Strava.
    #[error("Strava API error: {0}")]
    UpstreamFetch(String),

    /// No access token and no refresh token to obtain one.
    #[error("No usable Strava credentials, reauthorization required")]
    ReauthorizationRequired,

    #[error("GitHub dispatch failed: {0}")]
    DownstreamDispatch(String),

    #[error("Token store error: {0}")]
    Store(String),
}

impl AppError {
    /// True when the failure means our Strava credentials are unusable,
    /// as opposed to a transient fetch problem.
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            AppError::UpstreamAuth(_)
                | AppError::UpstreamUnauthorized
                | AppError::ReauthorizationRequired
        )
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            // Strava expects a bare 403 on a failed handshake.
            AppError::ValidationFailure => {
                return (StatusCode::FORBIDDEN, "Forbidden").into_response();
            }
            AppError::UpstreamAuth(msg) => (
                StatusCode::BAD_GATEWAY,
                "strava_auth_error",
                Some(msg.clone()),
            ),
            AppError::UpstreamUnauthorized | AppError::ReauthorizationRequired => {
                (StatusCode::BAD_GATEWAY, "strava_auth_error", None)
            }
            AppError::UpstreamFetch(msg) => {
                (StatusCode::BAD_GATEWAY, "strava_error", Some(msg.clone()))
            }
            AppError::DownstreamDispatch(msg) => {
                (StatusCode::BAD_GATEWAY, "dispatch_error", Some(msg.clone()))
            }
            AppError::Store(msg) => {
                tracing::error!(error = %msg, "Token store error");
                (StatusCode::INTERNAL_SERVER_ERROR, "store_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
