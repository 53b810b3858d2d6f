//! Mock KvStore for testing.
//!
//! Wraps `MemoryKvStore` with failure injection (reads / writes can be made to
//! fail independently) and call counters, so tests can assert that an operation
//! did or did not write.

use super::memory::MemoryKvStore;
use super::traits::{KvStore, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory mock implementation of KvStore for testing.
#[derive(Default)]
pub struct MockKvStore {
    inner: MemoryKvStore,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    /// Fail only writes to this key (e.g. the activity log)
    pub fail_writes_to: std::sync::Mutex<Option<String>>,
    pub exists_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub set_calls: AtomicUsize,
}

impl MockKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a write.
    pub async fn with_value(self, key: &str, value: Value) -> Self {
        self.inner.set(key, &value).await.expect("memory set");
        self
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes_to_key(&self, key: &str) {
        *self.fail_writes_to.lock().unwrap() = Some(key.to_string());
    }

    pub fn writes(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub fn existence_checks(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// Read a raw value, bypassing failure injection and counters.
    pub async fn raw(&self, key: &str) -> Option<Value> {
        self.inner.get(key).await.expect("memory get")
    }

    fn unavailable() -> StoreError {
        StoreError::Status {
            status: 503,
            message: "mock backend offline".to_string(),
        }
    }
}

#[async_trait]
impl KvStore for MockKvStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.inner.exists(key).await
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        let key_blocked = self.fail_writes_to.lock().unwrap().as_deref() == Some(key);
        if self.fail_writes.load(Ordering::SeqCst) || key_blocked {
            return Err(Self::unavailable());
        }
        self.inner.set(key, value).await
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(!self.fail_reads.load(Ordering::SeqCst))
    }
}
