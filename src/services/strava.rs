// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for fetching activities.
//!
//! Handles:
//! - Activity fetching with detailed polylines
//! - Refresh-token exchange
//!
//! A 401 from the API surfaces as [`AppError::UpstreamUnauthorized`] so the
//! caller can decide whether to refresh and retry.

use crate::config::Config;
use crate::error::AppError;
use serde::Deserialize;

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    oauth_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a Strava client from configuration, sharing `http`.
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.strava_api_url.trim_end_matches('/').to_string(),
            oauth_url: config.strava_oauth_url.clone(),
            client_id: config.strava_client_id.clone(),
            client_secret: config.strava_client_secret.clone(),
        }
    }

    /// Get a detailed activity by ID.
    pub async fn get_activity(
        &self,
        access_token: &str,
        activity_id: u64,
    ) -> Result<StravaActivity, AppError> {
        let url = format!("{}/activities/{}", self.base_url, activity_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::UpstreamFetch(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Exchange a refresh token for a new token set.
    ///
    /// Every failure, whatever its cause, is an [`AppError::UpstreamAuth`].
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenRefreshResponse, AppError> {
        let response = self
            .http
            .post(&self.oauth_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::UpstreamAuth(format!("Token refresh request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Strava token refresh rejected");
            return Err(AppError::UpstreamAuth(format!(
                "Token refresh failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamAuth(format!("Failed to parse token response: {}", e)))
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 401 {
                return Err(AppError::UpstreamUnauthorized);
            }

            if status.as_u16() == 429 {
                tracing::warn!("Strava rate limit hit (429)");
            }

            return Err(AppError::UpstreamFetch(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamFetch(format!("JSON parse error: {}", e)))
    }
}

/// Token refresh response from Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

/// Detailed Strava activity response (only the fields we forward).
#[derive(Debug, Clone, Deserialize)]
pub struct StravaActivity {
    pub id: u64,
    pub name: String,
    pub sport_type: String,
    pub distance: f64,
    #[serde(default)]
    pub map: StravaMap,
}

impl StravaActivity {
    /// Get the detailed polyline, falling back to summary if not available.
    pub fn get_polyline(&self) -> Option<&str> {
        self.map
            .polyline
            .as_deref()
            .filter(|p| !p.is_empty())
            .or(self.map.summary_polyline.as_deref())
            .filter(|p| !p.is_empty())
    }
}

/// Activity map data with polylines.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StravaMap {
    pub polyline: Option<String>,
    pub summary_polyline: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn activity(map: serde_json::Value) -> StravaActivity {
        serde_json::from_value(json!({
            "id": 1,
            "name": "Lunch Run",
            "sport_type": "Run",
            "distance": 5000.0,
            "map": map
        }))
        .unwrap()
    }

    #[test]
    fn test_prefers_detailed_polyline() {
        let a = activity(json!({"polyline": "detailed", "summary_polyline": "summary"}));
        assert_eq!(a.get_polyline(), Some("detailed"));
    }

    #[test]
    fn test_falls_back_to_summary_polyline() {
        let a = activity(json!({"polyline": null, "summary_polyline": "summary"}));
        assert_eq!(a.get_polyline(), Some("summary"));

        let a = activity(json!({"polyline": "", "summary_polyline": "summary"}));
        assert_eq!(a.get_polyline(), Some("summary"));
    }

    #[test]
    fn test_missing_map_has_no_polyline() {
        let a: StravaActivity = serde_json::from_value(json!({
            "id": 2,
            "name": "Yoga",
            "sport_type": "Yoga",
            "distance": 0.0
        }))
        .unwrap();
        assert_eq!(a.get_polyline(), None);

        let a = activity(json!({"summary_polyline": ""}));
        assert_eq!(a.get_polyline(), None);
    }
}
