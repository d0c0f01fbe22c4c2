// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore-backed token store.
//!
//! Each key is a document in the `tokens` collection holding the blob in a
//! `value` field.

use crate::db::{collections, TokenStore};
use crate::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Stored document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenDocument {
    value: String,
    /// When the value was last written (ISO 8601)
    updated_at: String,
}

/// Firestore token store.
#[derive(Clone)]
pub struct FirestoreTokenStore {
    client: firestore::FirestoreDb,
}

impl FirestoreTokenStore {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Store(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");
        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        // The emulator accepts any bearer token; hand it an unsigned JWT.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| AppError::Store(format!("Failed to connect to Firestore Emulator: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore (Emulator)");
        Ok(Self { client })
    }
}

#[async_trait]
impl TokenStore for FirestoreTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let doc: Option<TokenDocument> = self
            .client
            .fluent()
            .select()
            .by_id_in(collections::TOKENS)
            .obj()
            .one(key)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        Ok(doc.map(|d| d.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let doc = TokenDocument {
            value: value.to_string(),
            updated_at: chrono::Utc::now().to_rfc3339(),
        };

        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::TOKENS)
            .document_id(key)
            .object(&doc)
            .execute()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;
        Ok(())
    }
}
