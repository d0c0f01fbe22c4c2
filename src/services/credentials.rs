// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential store for the single Strava token record.
//!
//! Store failures never escape this layer: reads degrade to the bootstrap
//! tokens from configuration and writes are logged and dropped, so the
//! in-flight webhook keeps going with what it has in memory.

use crate::db::TokenStore;
use crate::error::AppError;
use crate::models::TokenRecord;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Deadline for a single store call unless configured otherwise.
const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Loads and saves the token record through a [`TokenStore`].
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn TokenStore>,
    key: String,
    bootstrap: TokenRecord,
    timeout: Duration,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn TokenStore>, key: impl Into<String>, bootstrap: TokenRecord) -> Self {
        Self {
            store,
            key: key.into(),
            bootstrap,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Bound every store call by `timeout`, whatever the backend.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| AppError::Store(format!("timed out after {:?}", self.timeout)))?
    }

    /// Read the persisted record, falling back to bootstrap values.
    pub async fn load(&self) -> TokenRecord {
        match self.bounded(self.store.get(&self.key)).await {
            Ok(Some(raw)) => match serde_json::from_str::<TokenRecord>(&raw) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        key = %self.key,
                        "Stored token record is corrupt, using bootstrap tokens"
                    );
                    self.bootstrap.clone()
                }
            },
            Ok(None) => {
                tracing::debug!(key = %self.key, "No stored token record, using bootstrap tokens");
                self.bootstrap.clone()
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    key = %self.key,
                    "Token store unavailable, using bootstrap tokens"
                );
                self.bootstrap.clone()
            }
        }
    }

    /// Overwrite the persisted record. Failures are logged only.
    pub async fn save(&self, record: &TokenRecord) {
        let raw = match serde_json::to_string(record) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize token record");
                return;
            }
        };

        match self.bounded(self.store.set(&self.key, &raw)).await {
            Ok(()) => tracing::debug!(key = %self.key, "Token record saved"),
            Err(e) => tracing::error!(
                error = %e,
                key = %self.key,
                "Failed to save token record, continuing with in-memory tokens"
            ),
        }
    }
}
