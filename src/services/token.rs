// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token refresh against the Strava OAuth endpoint.

use crate::error::AppError;
use crate::models::TokenRecord;
use crate::services::credentials::CredentialStore;
use crate::services::strava::StravaClient;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Exchanges refresh tokens and persists the result.
///
/// Refresh-then-save runs under a single mutex so two overlapping webhooks
/// cannot both spend the same refresh token and race to persist.
#[derive(Clone)]
pub struct TokenRefresher {
    client: StravaClient,
    credentials: CredentialStore,
    refresh_lock: Arc<Mutex<()>>,
}

impl TokenRefresher {
    pub fn new(client: StravaClient, credentials: CredentialStore) -> Self {
        Self {
            client,
            credentials,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Exchange `refresh_token` for a new token set, persist it, and return
    /// the new access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        let _guard = self.refresh_lock.lock().await;
        self.exchange(refresh_token).await
    }

    /// Obtain a replacement for `stale_access_token`.
    ///
    /// After taking the lock the stored record is re-read: if another
    /// request already replaced the stale token, its result is reused
    /// instead of spending the refresh token a second time.
    pub async fn renew(&self, stale_access_token: &str) -> Result<String, AppError> {
        let _guard = self.refresh_lock.lock().await;

        let current = self.credentials.load().await;
        if current.access_token != stale_access_token && !current.needs_refresh(Utc::now()) {
            tracing::info!("Token already refreshed by a concurrent request");
            return Ok(current.access_token);
        }

        if !current.has_refresh_token() {
            tracing::error!("No Strava refresh token available; reauthorization required");
            return Err(AppError::ReauthorizationRequired);
        }

        self.exchange(&current.refresh_token).await
    }

    /// Caller must hold `refresh_lock`.
    async fn exchange(&self, refresh_token: &str) -> Result<String, AppError> {
        tracing::info!("Refreshing Strava access token");

        let new_tokens = self.client.refresh_token(refresh_token).await?;

        let record = TokenRecord {
            access_token: new_tokens.access_token,
            refresh_token: new_tokens.refresh_token,
            expires_at: Some(new_tokens.expires_at),
        };
        self.credentials.save(&record).await;

        tracing::info!(expires_at = new_tokens.expires_at, "Strava token refreshed");
        Ok(record.access_token)
    }
}
