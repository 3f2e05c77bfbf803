//! Durable key-value storage boundary.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failures surfaced by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store rejected the operation.
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// A value could not be encoded for the backing store.
    #[error("storage serialization failure: {0}")]
    Serialization(String),
}

/// Durable key-value store consumed by persistent stores.
///
/// Keys are plain strings; values are JSON documents. Implementations must
/// tolerate unknown keys (`get` returns `Ok(None)`).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> StorageResult<Option<Value>>;

    /// Writes `value` under `key`, returning whether the write took effect.
    async fn set(&self, key: &str, value: Value) -> StorageResult<bool>;
}

/// In-memory [`KeyValueStore`] for tests and prototyping.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a key, e.g. to simulate state left by a prior session.
    pub fn seed(&self, key: impl Into<String>, value: Value) {
        self.entries.lock().insert(key.into(), value);
    }

    /// Synchronous read used by test assertions.
    pub fn snapshot(&self, key: &str) -> Option<Value> {
        self.entries.lock().get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> StorageResult<bool> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(true)
    }
}
