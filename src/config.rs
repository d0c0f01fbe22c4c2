//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honoured for local development. Secret values are
//! trimmed since they are usually pasted into deployment dashboards.

use crate::models::TokenRecord;
use std::env;
use std::time::Duration;

const DEFAULT_STRAVA_API_URL: &str = "https://www.strava.com/api/v3";
const DEFAULT_STRAVA_OAUTH_URL: &str = "https://www.strava.com/oauth/token";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_EVENT_TYPE: &str = "strava_activity";
const DEFAULT_TOKEN_STORE_URL: &str = "memory://";
const DEFAULT_TOKEN_STORE_KEY: &str = "strava_tokens";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 5;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Strava ---
    /// Strava OAuth client ID
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Shared secret for the webhook subscription handshake
    pub strava_verify_token: String,
    /// Access token used until a record has been persisted
    pub strava_bootstrap_access_token: String,
    /// Refresh token used until a record has been persisted
    pub strava_bootstrap_refresh_token: String,
    pub strava_api_url: String,
    pub strava_oauth_url: String,

    // --- GitHub repository_dispatch ---
    pub github_token: String,
    pub github_repo_owner: String,
    pub github_repo_name: String,
    pub github_event_type: String,
    pub github_api_url: String,

    // --- Token store ---
    /// Connection string selecting the blob store backend
    pub token_store_url: String,
    /// Key under which the single token record lives
    pub token_store_key: String,

    // --- Server ---
    /// Timeout applied to every outbound HTTP call
    pub http_timeout: Duration,
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            strava_verify_token: "test_verify_token".to_string(),
            strava_bootstrap_access_token: "bootstrap_access".to_string(),
            strava_bootstrap_refresh_token: "bootstrap_refresh".to_string(),
            strava_api_url: DEFAULT_STRAVA_API_URL.to_string(),
            strava_oauth_url: DEFAULT_STRAVA_OAUTH_URL.to_string(),
            github_token: "test_github_token".to_string(),
            github_repo_owner: "octocat".to_string(),
            github_repo_name: "activities".to_string(),
            github_event_type: DEFAULT_EVENT_TYPE.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            token_store_url: DEFAULT_TOKEN_STORE_URL.to_string(),
            token_store_key: DEFAULT_TOKEN_STORE_KEY.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            strava_client_id: required("STRAVA_CLIENT_ID")?,
            strava_client_secret: required("STRAVA_CLIENT_SECRET")?,
            strava_verify_token: required("STRAVA_VERIFY_TOKEN")?,
            strava_bootstrap_access_token: optional("STRAVA_ACCESS_TOKEN").unwrap_or_default(),
            strava_bootstrap_refresh_token: optional("STRAVA_REFRESH_TOKEN").unwrap_or_default(),
            strava_api_url: optional("STRAVA_API_URL")
                .unwrap_or_else(|| DEFAULT_STRAVA_API_URL.to_string()),
            strava_oauth_url: optional("STRAVA_OAUTH_URL")
                .unwrap_or_else(|| DEFAULT_STRAVA_OAUTH_URL.to_string()),

            github_token: required("GITHUB_TOKEN")?,
            github_repo_owner: required("GITHUB_REPO_OWNER")?,
            github_repo_name: required("GITHUB_REPO_NAME")?,
            github_event_type: optional("GITHUB_EVENT_TYPE")
                .unwrap_or_else(|| DEFAULT_EVENT_TYPE.to_string()),
            github_api_url: optional("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),

            token_store_url: optional("TOKEN_STORE_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_STORE_URL.to_string()),
            token_store_key: optional("TOKEN_STORE_KEY")
                .unwrap_or_else(|| DEFAULT_TOKEN_STORE_KEY.to_string()),

            http_timeout: http_timeout()?,
            port: parse_or("PORT", 8080)?,
        })
    }

    /// Token record seeded from configuration, used before anything has
    /// been persisted to the store.
    pub fn bootstrap_tokens(&self) -> TokenRecord {
        TokenRecord {
            access_token: self.strava_bootstrap_access_token.clone(),
            refresh_token: self.strava_bootstrap_refresh_token.clone(),
            expires_at: None,
        }
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

/// Read a variable, treating blank values as unset.
fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid(name, raw)),
        None => Ok(default),
    }
}

/// Outbound call timeout; zero would fail every call immediately.
fn http_timeout() -> Result<Duration, ConfigError> {
    match parse_or("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)? {
        0 => Err(ConfigError::Invalid("HTTP_TIMEOUT_SECS", "0".to_string())),
        secs => Ok(Duration::from_secs(secs)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
