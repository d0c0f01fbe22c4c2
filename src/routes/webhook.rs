// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Webhook routes for Strava events.

use crate::error::AppError;
use crate::models::{ActivityData, WebhookEvent};
use crate::services::validate_subscription;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Json, Query, State},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Webhook routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/strava_webhook", get(verify).post(handle_event))
}

/// Strava webhook verification query params.
#[derive(Deserialize)]
struct VerifyParams {
    #[serde(rename = "hub.mode")]
    mode: Option<String>,
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
    #[serde(rename = "hub.verify_token")]
    verify_token: Option<String>,
}

/// Verification response.
#[derive(Serialize)]
struct VerifyResponse {
    #[serde(rename = "hub.challenge")]
    challenge: String,
}

/// Acknowledgment returned for every event POST.
#[derive(Serialize)]
struct AckResponse {
    status: &'static str,
}

const ACK: AckResponse = AckResponse { status: "success" };

/// Verify webhook subscription (GET).
async fn verify(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VerifyParams>,
) -> Result<Json<VerifyResponse>, AppError> {
    let result = validate_subscription(
        params.mode.as_deref(),
        params.verify_token.as_deref(),
        params.challenge.as_deref(),
        &state.config.strava_verify_token,
    );

    match result {
        Ok(challenge) => {
            tracing::info!("Webhook subscription verified");
            Ok(Json(VerifyResponse { challenge }))
        }
        Err(e) => {
            tracing::warn!(
                mode = params.mode.as_deref().unwrap_or(""),
                "Webhook verification failed"
            );
            Err(e)
        }
    }
}

/// Handle incoming webhook events (POST).
///
/// Always answers 200: Strava retries anything else, and nothing that goes
/// wrong downstream is the sender's problem.
async fn handle_event(State(state): State<Arc<AppState>>, body: Bytes) -> Json<AckResponse> {
    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!(
                error = %e,
                body = %String::from_utf8_lossy(&body),
                "Failed to parse webhook event"
            );
            return Json(ACK);
        }
    };

    tracing::info!(
        object_type = ?event.object_type,
        object_id = event.object_id,
        aspect_type = ?event.aspect_type,
        owner_id = event.owner_id,
        subscription_id = ?event.subscription_id,
        "Webhook event received"
    );

    if event.is_new_activity() {
        relay_activity(&state, event.object_id, event.owner_id).await;
    } else {
        tracing::debug!(
            object_type = ?event.object_type,
            aspect_type = ?event.aspect_type,
            "Ignoring event"
        );
    }

    Json(ACK)
}

/// Enrich and dispatch one new activity. Never fails.
async fn relay_activity(state: &AppState, activity_id: u64, owner_id: u64) {
    let activity_data = match state.enricher.enrich(activity_id, owner_id).await {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(
                activity_id,
                error = %e,
                credential_error = e.is_credential_error(),
                "Enrichment aborted, dispatching minimal payload"
            );
            ActivityData::minimal(&e)
        }
    };

    if let Err(e) = state
        .dispatcher
        .forward(activity_id, owner_id, &activity_data)
        .await
    {
        tracing::error!(activity_id, error = %e, "Failed to trigger GitHub dispatch");
    }
}
