//! KvStore trait definition
//!
//! The storage boundary of the dashboard: a remote key-value store holding one
//! JSON document per key, read and written whole. No transactions, no
//! field-level patching, no TTLs.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure reaching or talking to the key-value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network / HTTP client failure (connect, timeout, TLS, body read)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success HTTP status
    #[error("backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Backend answered 2xx but reported an error in its payload
    #[error("backend error: {0}")]
    Backend(String),

    /// A stored value could not be encoded/decoded as JSON
    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Abstract interface over the remote key-value store.
///
/// Implemented by `RestKvClient` (Upstash / Vercel KV REST protocol) and
/// `MemoryKvStore` (process-local). Each value is an opaque JSON document.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Whether a value is stored under `key`
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Read the full value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the full value stored under `key`
    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Check backend connectivity
    async fn health_check(&self) -> Result<bool, StoreError>;
}
