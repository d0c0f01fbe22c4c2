//! In-process token store for local development and tests.

use crate::db::TokenStore;
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Token store backed by a shared map; clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let values = self
            .values
            .read()
            .map_err(|_| AppError::Store("memory store lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| AppError::Store("memory store lock poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
