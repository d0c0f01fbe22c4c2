// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity data forwarded to the GitHub dispatch.

use crate::error::AppError;
use serde::Serialize;

/// Projection of a Strava activity sent downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPayload {
    /// Activity name/title
    pub name: String,
    /// Distance in meters
    pub distance: f64,
    /// Sport type (Ride, Run, Hike, etc.)
    pub sport_type: String,
    /// Route as `[latitude, longitude]` pairs, empty for non-GPS activities
    pub decoded_path: Vec<[f64; 2]>,
}

/// Stand-in sent when the activity could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinimalPayload {
    pub error: String,
}

/// The `activity_data` field of a dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActivityData {
    Enriched(EnrichedPayload),
    Minimal(MinimalPayload),
}

impl ActivityData {
    /// Minimal payload describing why enrichment failed.
    pub fn minimal(err: &AppError) -> Self {
        ActivityData::Minimal(MinimalPayload {
            error: err.to_string(),
        })
    }

    pub fn is_enriched(&self) -> bool {
        matches!(self, ActivityData::Enriched(_))
    }
}
