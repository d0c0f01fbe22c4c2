// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitHub `repository_dispatch` forwarder.

use crate::config::Config;
use crate::error::AppError;
use crate::models::ActivityData;
use serde::Serialize;

/// Body of `POST /repos/{owner}/{repo}/dispatches`.
#[derive(Debug, Serialize)]
struct DispatchEvent<'a> {
    event_type: &'a str,
    client_payload: ClientPayload<'a>,
}

#[derive(Debug, Serialize)]
struct ClientPayload<'a> {
    activity_id: u64,
    owner_id: u64,
    activity_data: &'a ActivityData,
}

/// Posts activity triggers to a GitHub repository.
///
/// Uses its own bearer credential, unrelated to the Strava tokens.
#[derive(Clone)]
pub struct DispatchService {
    http: reqwest::Client,
    url: String,
    token: String,
    event_type: String,
}

impl DispatchService {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        let url = format!(
            "{}/repos/{}/{}/dispatches",
            config.github_api_url.trim_end_matches('/'),
            config.github_repo_owner,
            config.github_repo_name
        );

        Self {
            http,
            url,
            token: config.github_token.clone(),
            event_type: config.github_event_type.clone(),
        }
    }

    /// Trigger the workflow for one activity.
    pub async fn forward(
        &self,
        activity_id: u64,
        owner_id: u64,
        activity_data: &ActivityData,
    ) -> Result<(), AppError> {
        let body = DispatchEvent {
            event_type: &self.event_type,
            client_payload: ClientPayload {
                activity_id,
                owner_id,
                activity_data,
            },
        };

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::DownstreamDispatch(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::DownstreamDispatch(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        tracing::info!(
            activity_id,
            enriched = activity_data.is_enriched(),
            "GitHub dispatch triggered"
        );
        Ok(())
    }
}
