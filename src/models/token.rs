// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth token record for the single connected Strava account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Margin before token expiration when we proactively refresh (5 minutes).
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// The one persisted Strava credential set.
///
/// Always replaced wholesale; nothing mutates individual fields of a
/// stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Access token expiry (Unix seconds), unknown for bootstrap values
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl TokenRecord {
    pub fn has_access_token(&self) -> bool {
        !self.access_token.is_empty()
    }

    pub fn has_refresh_token(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    /// Whether the access token must be refreshed before use.
    ///
    /// An unknown expiry is trusted until Strava rejects the token.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        if !self.has_access_token() {
            return true;
        }
        self.expires_at
            .is_some_and(|expires_at| now.timestamp() + TOKEN_REFRESH_MARGIN_SECS >= expires_at)
    }
}
