//! Process-local key-value store
//!
//! Used when no remote KV endpoint is configured (local development) and by
//! integration tests. Values live only as long as the process.

use super::traits::{KvStore, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory `KvStore` backed by a `HashMap`
#[derive(Default)]
pub struct MemoryKvStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryKvStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value into the store (builder style).
    pub async fn with_value(self, key: &str, value: Value) -> Self {
        self.values.write().await.insert(key.to_string(), value);
        self
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.values.read().await.contains_key(key))
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
