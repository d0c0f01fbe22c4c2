//! Token store backends.
//!
//! The token record is kept as an opaque string blob under a single key.
//! Which backend holds it is chosen by the `TOKEN_STORE_URL` connection
//! string:
//!
//! - `memory://` (or empty): process-local map
//! - `http(s)://user:token@host`: Redis-compatible REST key-value service
//! - `firestore://<project-id>`: one document in Firestore

pub mod firestore;
pub mod kv;
pub mod memory;

pub use firestore::FirestoreTokenStore;
pub use kv::KvTokenStore;
pub use memory::MemoryTokenStore;

use crate::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;

/// Collection names as constants.
pub mod collections {
    pub const TOKENS: &str = "tokens";
}

/// Generic get/set blob store.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the value under `key`, `None` if nothing was ever written.
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Overwrite the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// Open the backend named by a connection string.
pub async fn connect(
    url: &str,
    http: reqwest::Client,
) -> Result<Arc<dyn TokenStore>, AppError> {
    let url = url.trim();

    if url.is_empty() || url.starts_with("memory://") {
        tracing::warn!("Using in-memory token store; refreshed tokens will not survive restarts");
        return Ok(Arc::new(MemoryTokenStore::new()));
    }

    if let Some(project_id) = url.strip_prefix("firestore://") {
        let store = FirestoreTokenStore::new(project_id.trim_end_matches('/')).await?;
        return Ok(Arc::new(store));
    }

    if url.starts_with("https://") || url.starts_with("http://") {
        return Ok(Arc::new(KvTokenStore::from_url(url, http)?));
    }

    // Only echo the scheme; the rest may contain credentials.
    let scheme = url.split("://").next().unwrap_or_default();
    Err(AppError::Store(format!(
        "Unsupported token store scheme: {}",
        scheme
    )))
}
