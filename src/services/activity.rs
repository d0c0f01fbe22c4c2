// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity enrichment service.
//!
//! Handles the core workflow:
//! 1. Load the token record, refreshing up front if it is unusable
//! 2. Fetch the activity from Strava
//! 3. On 401, refresh once and fetch again
//! 4. Decode the polyline and project the forwarded fields

use crate::error::{AppError, Result};
use crate::models::{ActivityData, EnrichedPayload};
use crate::services::credentials::CredentialStore;
use crate::services::strava::{StravaActivity, StravaClient};
use crate::services::token::TokenRefresher;
use chrono::Utc;

/// Polyline precision used by Strava (1e5).
const POLYLINE_PRECISION: u32 = 5;

/// Turns a webhook's activity ID into the data we forward.
#[derive(Clone)]
pub struct ActivityEnricher {
    strava: StravaClient,
    credentials: CredentialStore,
    refresher: TokenRefresher,
}

impl ActivityEnricher {
    pub fn new(
        strava: StravaClient,
        credentials: CredentialStore,
        refresher: TokenRefresher,
    ) -> Self {
        Self {
            strava,
            credentials,
            refresher,
        }
    }

    /// Enrich an activity.
    ///
    /// Returns `Ok(Minimal)` for transient fetch failures so the event is
    /// still dispatched. Credential failures (`ReauthorizationRequired`,
    /// `UpstreamAuth`) are returned as errors for the caller to handle.
    pub async fn enrich(&self, activity_id: u64, owner_id: u64) -> Result<ActivityData> {
        tracing::info!(activity_id, owner_id, "Enriching activity");

        let record = self.credentials.load().await;

        let access_token = if record.needs_refresh(Utc::now()) {
            if !record.has_refresh_token() {
                return Err(AppError::ReauthorizationRequired);
            }
            tracing::info!(activity_id, "Access token missing or expired, refreshing first");
            self.refresher.renew(&record.access_token).await?
        } else {
            record.access_token
        };

        // First attempt.
        let activity = match self.strava.get_activity(&access_token, activity_id).await {
            Ok(activity) => activity,
            Err(AppError::UpstreamUnauthorized) => {
                tracing::info!(activity_id, "Access token rejected, refreshing and retrying once");
                let access_token = self.refresher.renew(&access_token).await?;

                // Second and final attempt.
                match self.strava.get_activity(&access_token, activity_id).await {
                    Ok(activity) => activity,
                    Err(AppError::UpstreamUnauthorized) => {
                        return Err(AppError::UpstreamAuth(
                            "refreshed access token was rejected".to_string(),
                        ));
                    }
                    Err(e) => return Ok(degrade(activity_id, e)),
                }
            }
            Err(e) => return Ok(degrade(activity_id, e)),
        };

        let payload = project(activity);
        tracing::info!(
            activity_id,
            sport_type = %payload.sport_type,
            points = payload.decoded_path.len(),
            "Activity enriched"
        );
        Ok(ActivityData::Enriched(payload))
    }
}

fn degrade(activity_id: u64, err: AppError) -> ActivityData {
    tracing::warn!(activity_id, error = %err, "Activity fetch failed, sending minimal payload");
    ActivityData::minimal(&err)
}

/// Keep only the forwarded fields, decoding the route.
fn project(activity: StravaActivity) -> EnrichedPayload {
    let decoded_path = match activity.get_polyline() {
        Some(encoded) => decode_path(encoded).unwrap_or_else(|e| {
            tracing::warn!(activity_id = activity.id, error = %e, "Undecodable polyline, dropping path");
            Vec::new()
        }),
        None => Vec::new(),
    };

    EnrichedPayload {
        name: activity.name,
        distance: activity.distance,
        sport_type: activity.sport_type,
        decoded_path,
    }
}

/// Decode an encoded polyline into `[latitude, longitude]` pairs.
pub fn decode_path(encoded: &str) -> std::result::Result<Vec<[f64; 2]>, String> {
    let line = polyline::decode_polyline(encoded, POLYLINE_PRECISION).map_err(|e| e.to_string())?;
    // geo coordinates are (x = longitude, y = latitude).
    Ok(line.0.iter().map(|c| [c.y, c.x]).collect())
}
