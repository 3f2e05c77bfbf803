//! State-synchronization substrate shared by every execution context.
//!
//! This crate provides the foundational pieces of the action/store pattern:
//! * [`SyncAction`] / [`AsyncAction`] – typed fan-out channels connecting
//!   message handlers to stores.
//! * [`StoreCore`] – snapshot-published state cell with change notification.
//! * [`PersistentCore`] – a store core that writes each new snapshot to a
//!   durable key-value store before notifying subscribers.
//! * [`KeyValueStore`] – the durable storage boundary, with an in-memory
//!   implementation for tests and prototyping.

mod action;
mod persistent;
mod storage;
mod store;
mod store_names;

pub use action::{AsyncAction, AsyncListener, SyncAction};
pub use persistent::{seed_from_persisted, storage_key, PersistentCore};
pub use storage::{InMemoryKeyValueStore, KeyValueStore, StorageError, StorageResult};
pub use store::StoreCore;
pub use store_names::StoreName;
