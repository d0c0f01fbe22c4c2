// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{Request, Response};
use std::sync::Arc;
use std::time::Duration;
use strava_relay::config::Config;
use strava_relay::db::{MemoryTokenStore, TokenStore};
use strava_relay::models::TokenRecord;
use strava_relay::routes::create_router;
use strava_relay::AppState;
use tower::ServiceExt;
use wiremock::MockServer;

pub const TOKEN_KEY: &str = "strava_tokens";

/// Config pointing every outbound call at `server`.
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> Config {
    Config {
        strava_api_url: format!("{}/api/v3", server.uri()),
        strava_oauth_url: format!("{}/oauth/token", server.uri()),
        github_api_url: server.uri(),
        token_store_key: TOKEN_KEY.to_string(),
        http_timeout: Duration::from_secs(2),
        ..Config::default()
    }
}

/// Create a test app with an in-memory token store.
/// Returns the router and the store so tests can inspect saved tokens.
#[allow(dead_code)]
pub fn create_test_app(config: Config) -> (axum::Router, MemoryTokenStore) {
    let store = MemoryTokenStore::new();
    let app = create_test_app_with_store(config, Arc::new(store.clone()));
    (app, store)
}

#[allow(dead_code)]
pub fn create_test_app_with_store(config: Config, store: Arc<dyn TokenStore>) -> axum::Router {
    let state = Arc::new(AppState::new(config, store).expect("Failed to build state"));
    create_router(state)
}

/// Persist a token record the way the service does.
#[allow(dead_code)]
pub async fn seed_tokens(store: &MemoryTokenStore, record: &TokenRecord) {
    store
        .set(TOKEN_KEY, &serde_json::to_string(record).unwrap())
        .await
        .unwrap();
}

#[allow(dead_code)]
pub async fn stored_tokens(store: &MemoryTokenStore) -> Option<TokenRecord> {
    store
        .get(TOKEN_KEY)
        .await
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

/// POST a JSON webhook event.
#[allow(dead_code)]
pub async fn post_event(app: axum::Router, event: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/strava_webhook")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&event).unwrap()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[allow(dead_code)]
pub fn create_activity_event(activity_id: u64) -> serde_json::Value {
    serde_json::json!({
        "aspect_type": "create",
        "event_time": 1516126040,
        "object_id": activity_id,
        "object_type": "activity",
        "owner_id": 134815,
        "subscription_id": 120475,
        "updates": {}
    })
}
