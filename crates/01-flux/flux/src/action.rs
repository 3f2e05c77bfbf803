//! Typed synchronous/asynchronous fan-out channels.
//!
//! An action is the only write path into a store: message handlers invoke an
//! action, every subscribed store listener runs, and the stores republish
//! "changed" to their own subscribers. Listeners run in registration order.
//! Failures are deliberately loud: a panicking sync listener or a rejecting
//! async listener surfaces to the invoker, because a failing listener is a
//! programming error rather than recoverable input.

use std::sync::Arc;

use futures::future::{join_all, BoxFuture};
use parking_lot::Mutex;
use smallvec::SmallVec;

type SyncListener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Listener signature for [`AsyncAction`]; the returned future must own any
/// payload data it needs past the initial call.
pub type AsyncListener<T> = Arc<dyn Fn(&T) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Fan-out channel whose dispatch completes before `invoke` returns.
///
/// Listeners may not be unregistered; the set only grows. Invoking with no
/// listeners is a no-op.
pub struct SyncAction<T> {
    listeners: Mutex<Vec<SyncListener<T>>>,
}

impl<T> SyncAction<T> {
    /// Creates an action with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Registers a listener; listeners run in registration order.
    pub fn add_listener(&self, listener: impl Fn(&T) + Send + Sync + 'static) {
        self.listeners.lock().push(Arc::new(listener));
    }

    /// Calls every listener in registration order.
    ///
    /// A panicking listener aborts the remaining listeners and propagates;
    /// callers must not assume isolation between listeners.
    pub fn invoke(&self, payload: &T) {
        // Snapshot outside the lock so a listener may register further
        // listeners without deadlocking. Late registrations are not seen by
        // the in-flight dispatch.
        let snapshot: SmallVec<[SyncListener<T>; 4]> =
            self.listeners.lock().iter().cloned().collect();
        for listener in snapshot {
            listener(payload);
        }
    }
}

impl<T> Default for SyncAction<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fan-out channel whose dispatch settles asynchronously.
///
/// `invoke` starts every listener in registration order, then awaits all of
/// them; the asynchronous tails may interleave. The first listener error is
/// surfaced to the invoker after every listener has settled.
pub struct AsyncAction<T> {
    listeners: Mutex<Vec<AsyncListener<T>>>,
}

impl<T> AsyncAction<T> {
    /// Creates an action with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Registers an async listener; listeners start in registration order.
    pub fn add_listener(
        &self,
        listener: impl Fn(&T) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync + 'static,
    ) {
        self.listeners.lock().push(Arc::new(listener));
    }

    /// Invokes every listener and resolves once all of them have settled.
    ///
    /// Invoking with no listeners resolves immediately.
    pub async fn invoke(&self, payload: &T) -> anyhow::Result<()> {
        let snapshot: SmallVec<[AsyncListener<T>; 4]> =
            self.listeners.lock().iter().cloned().collect();
        let futures: Vec<_> = snapshot.iter().map(|listener| listener(payload)).collect();
        let results = join_all(futures).await;
        for result in results {
            result?;
        }
        Ok(())
    }
}

impl<T> Default for AsyncAction<T> {
    fn default() -> Self {
        Self::new()
    }
}
