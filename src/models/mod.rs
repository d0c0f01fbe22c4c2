// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod event;
pub mod token;

pub use activity::{ActivityData, EnrichedPayload, MinimalPayload};
pub use event::{AspectType, ObjectType, WebhookEvent};
pub use token::TokenRecord;
