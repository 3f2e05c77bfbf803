//! Store core with best-effort durability.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::storage::KeyValueStore;
use crate::store::StoreCore;
use crate::store_names::StoreName;

/// Builds the durable storage key for a store, scoped to its target context
/// so concurrent targets do not collide.
pub fn storage_key(name: StoreName, target_id: Option<u32>) -> String {
    match target_id {
        Some(target_id) => format!("{}:{target_id}", name.key_segment()),
        None => name.key_segment().to_string(),
    }
}

/// Merges a persisted snapshot over the default state, field by field.
///
/// Persisted top-level fields override the serialized default; fields absent
/// from the persisted payload (e.g. introduced after it was written) keep
/// their defaults. Anything unreadable falls back to the default state, so a
/// corrupt payload can never prevent a store from starting.
pub fn seed_from_persisted<T>(persisted: Option<Value>) -> T
where
    T: Default + Serialize + DeserializeOwned,
{
    let Some(Value::Object(overrides)) = persisted else {
        return T::default();
    };
    let mut merged = match serde_json::to_value(T::default()) {
        Ok(Value::Object(map)) => map,
        _ => return T::default(),
    };
    for (field, value) in overrides {
        merged.insert(field, value);
    }
    serde_json::from_value(Value::Object(merged)).unwrap_or_else(|_| T::default())
}

/// A [`StoreCore`] that writes every new snapshot to durable storage before
/// emitting "changed".
///
/// Durability is best-effort: a failed write is logged and the in-memory
/// emission still happens, because the running session's source of truth is
/// the in-memory state.
pub struct PersistentCore<T> {
    core: StoreCore<T>,
    storage: Arc<dyn KeyValueStore>,
    key: String,
    persist: bool,
}

impl<T> PersistentCore<T>
where
    T: Serialize + Send + Sync + 'static,
{
    /// Creates a persistent core writing under `storage_key(name, target_id)`.
    ///
    /// `persist` disables the durable writes entirely (the store then behaves
    /// like a plain [`StoreCore`]), used when persistence is switched off for
    /// a context.
    pub fn new(
        name: StoreName,
        storage: Arc<dyn KeyValueStore>,
        target_id: Option<u32>,
        persist: bool,
    ) -> Self {
        Self {
            key: storage_key(name, target_id),
            core: StoreCore::new(name),
            storage,
            persist,
        }
    }

    /// The store's stable identity.
    pub fn name(&self) -> StoreName {
        self.core.name()
    }

    /// The durable storage key this core writes under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// See [`StoreCore::initialize`].
    pub fn initialize(&self, seed: T) {
        self.core.initialize(seed);
    }

    /// See [`StoreCore::state`].
    pub fn state(&self) -> Option<Arc<T>> {
        self.core.state()
    }

    /// See [`StoreCore::update`].
    pub fn update(&self, f: impl FnOnce(&T) -> Option<T>) -> bool {
        self.core.update(f)
    }

    /// See [`StoreCore::on_changed`].
    pub fn on_changed(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.core.on_changed(callback);
    }

    /// Emits "changed" without persisting; used by the get-current-state
    /// control action, which mutates nothing.
    pub fn emit_changed(&self) {
        self.core.emit_changed();
    }

    /// Persists the current snapshot, then emits "changed".
    ///
    /// Write failures (and writes the backend reports as not taken) are
    /// logged and do not suppress the emission.
    pub async fn persist_and_emit(&self) {
        if self.persist {
            if let Some(state) = self.core.state() {
                self.write_snapshot(&state).await;
            }
        }
        self.core.emit_changed();
    }

    async fn write_snapshot(&self, state: &T) {
        let value = match serde_json::to_value(state) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("store {}: snapshot not serializable: {err}", self.key);
                return;
            }
        };
        match self.storage.set(&self.key, value).await {
            Ok(true) => {}
            Ok(false) => {
                log::warn!("store {}: durable write not applied", self.key);
            }
            Err(err) => {
                log::warn!("store {}: durable write failed: {err}", self.key);
            }
        }
    }
}
