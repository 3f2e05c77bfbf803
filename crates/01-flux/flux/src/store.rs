//! Snapshot-published state cell with change notification.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::store_names::StoreName;

type ChangedListener = Arc<dyn Fn() + Send + Sync>;

/// Holds one `T` and republishes "changed" after every mutation.
///
/// The core is the sole writer of its state; readers only ever observe
/// immutable snapshots (`Arc<T>`), so no reader can corrupt store state
/// through a returned reference. Before [`StoreCore::initialize`] runs,
/// [`StoreCore::state`] returns `None` so ordering bugs stay observable.
pub struct StoreCore<T> {
    name: StoreName,
    state: ArcSwapOption<T>,
    changed: Mutex<Vec<ChangedListener>>,
}

impl<T: Send + Sync + 'static> StoreCore<T> {
    /// Creates an uninitialized core for the named store.
    pub fn new(name: StoreName) -> Self {
        Self {
            name,
            state: ArcSwapOption::const_empty(),
            changed: Mutex::new(Vec::new()),
        }
    }

    /// The store's stable identity.
    pub fn name(&self) -> StoreName {
        self.name
    }

    /// Installs the initial state. Must run before any mutation.
    pub fn initialize(&self, seed: T) {
        self.state.store(Some(Arc::new(seed)));
    }

    /// Current snapshot, or `None` before initialization.
    pub fn state(&self) -> Option<Arc<T>> {
        self.state.load_full()
    }

    /// Copy-on-write update.
    ///
    /// `f` receives the current snapshot and returns the replacement state,
    /// or `None` to signal a stale-reference no-op. Returns whether a new
    /// snapshot was published; callers emit "changed" (or persist-then-emit)
    /// only when it did. Updating an uninitialized core is also a no-op.
    pub fn update(&self, f: impl FnOnce(&T) -> Option<T>) -> bool {
        let Some(current) = self.state.load_full() else {
            return false;
        };
        match f(&current) {
            Some(next) => {
                self.state.store(Some(Arc::new(next)));
                true
            }
            None => false,
        }
    }

    /// Subscribes a callback to "changed" emissions.
    pub fn on_changed(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.changed.lock().push(Arc::new(callback));
    }

    /// Notifies every subscriber. Subscribers must re-fetch the snapshot
    /// rather than assume the emission carries state.
    pub fn emit_changed(&self) {
        let snapshot: SmallVec<[ChangedListener; 4]> =
            self.changed.lock().iter().cloned().collect();
        for listener in snapshot {
            listener();
        }
    }
}
