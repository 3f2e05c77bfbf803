//! Per-context message router.
//!
//! Each execution context owns exactly one [`Interpreter`]; the transport
//! hands it every inbound message and the interpreter dispatches by
//! [`MessageKind`] to whichever handlers this context registered. A context
//! only implements the subset of kinds it cares about, so an unregistered
//! kind is a silent no-op rather than an error.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use messages::{Message, MessageKind};
use parking_lot::Mutex;

/// Future returned by a registered handler.
pub type HandlerFuture = BoxFuture<'static, anyhow::Result<()>>;

type Handler = Arc<dyn Fn(Message) -> HandlerFuture + Send + Sync>;

/// Outcome of [`Interpreter::interpret`].
pub enum InterpretResult {
    /// No handler is registered for the message's kind.
    NotHandled,
    /// The handler accepted the message; await the future for completion.
    Handled(HandlerFuture),
}

impl InterpretResult {
    /// Whether a handler accepted the message.
    pub fn is_handled(&self) -> bool {
        matches!(self, InterpretResult::Handled(_))
    }

    /// Awaits the handler if there was one; `NotHandled` resolves to `Ok`.
    ///
    /// Handler failures propagate to the awaiter.
    pub async fn resolve(self) -> anyhow::Result<()> {
        match self {
            InterpretResult::NotHandled => Ok(()),
            InterpretResult::Handled(future) => future.await,
        }
    }
}

/// Routes inbound messages to handlers registered per [`MessageKind`].
#[derive(Default)]
pub struct Interpreter {
    handlers: Mutex<HashMap<MessageKind, Handler>>,
}

impl Interpreter {
    /// Creates a router with no registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `handler` with `kind`.
    ///
    /// Re-registering a kind overwrites the previous handler and logs a
    /// warning; double-registration is almost always a wiring mistake, but
    /// overwrite keeps reconfiguration possible.
    pub fn register(
        &self,
        kind: MessageKind,
        handler: impl Fn(Message) -> HandlerFuture + Send + Sync + 'static,
    ) {
        let previous = self.handlers.lock().insert(kind, Arc::new(handler));
        if previous.is_some() {
            log::warn!("interpreter: overwriting handler for {kind:?}");
        }
    }

    /// Looks up the handler for `message` and starts it.
    ///
    /// Never fails on its own: a missing handler yields
    /// [`InterpretResult::NotHandled`], since messages may legitimately reach
    /// contexts that do not care about them.
    pub fn interpret(&self, message: Message) -> InterpretResult {
        let handler = self.handlers.lock().get(&message.kind()).cloned();
        match handler {
            Some(handler) => InterpretResult::Handled(handler(message)),
            None => InterpretResult::NotHandled,
        }
    }
}
