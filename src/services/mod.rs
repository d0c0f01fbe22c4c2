// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod credentials;
pub mod dispatch;
pub mod strava;
pub mod subscription;
pub mod token;

pub use activity::ActivityEnricher;
pub use credentials::CredentialStore;
pub use dispatch::DispatchService;
pub use strava::StravaClient;
pub use subscription::validate_subscription;
pub use token::TokenRefresher;
