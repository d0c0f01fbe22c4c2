// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava-Relay: forward new Strava activities to GitHub Actions
//!
//! Receives Strava webhook events, enriches new activities with data from
//! the Strava API (refreshing the OAuth token when needed), and triggers a
//! GitHub `repository_dispatch` with the result.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use anyhow::Context;
use config::Config;
use db::TokenStore;
use services::{ActivityEnricher, CredentialStore, DispatchService, StravaClient, TokenRefresher};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub enricher: ActivityEnricher,
    pub dispatcher: DispatchService,
}

impl AppState {
    /// Wire up services around an already-opened token store.
    pub fn new(config: Config, store: Arc<dyn TokenStore>) -> anyhow::Result<Self> {
        let http = http_client(&config)?;

        let credentials =
            CredentialStore::new(store, config.token_store_key.clone(), config.bootstrap_tokens())
                .with_timeout(config.http_timeout);
        let strava = StravaClient::new(http.clone(), &config);
        let refresher = TokenRefresher::new(strava.clone(), credentials.clone());
        let enricher = ActivityEnricher::new(strava, credentials, refresher);
        let dispatcher = DispatchService::new(http, &config);

        Ok(Self {
            config,
            enricher,
            dispatcher,
        })
    }
}

/// HTTP client shared by every outbound call.
///
/// GitHub rejects requests without a User-Agent.
pub fn http_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.http_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed building HTTP client")
}
