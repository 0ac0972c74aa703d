//! Fans one stream of lifecycle events out to every attached handler.

use std::sync::Arc;

use tracing::trace;

use crate::handler::CallbackHandler;
use crate::types::CallbackEvent;

/// Ordered set of handlers sharing one event stream.
///
/// Each handler keeps its own state; the manager only forwards. Handlers are called in
/// attachment order.
#[derive(Clone, Default)]
pub struct CallbackManager {
  handlers: Vec<Arc<dyn CallbackHandler>>,
}

impl std::fmt::Debug for CallbackManager {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_list()
      .entries(self.handlers.iter().map(|h| h.name()))
      .finish()
  }
}

impl CallbackManager {
  pub fn new() -> Self {
    Self::default()
  }

  /// Attaches a handler after those already attached.
  pub fn with_handler(mut self, handler: Arc<dyn CallbackHandler>) -> Self {
    self.add_handler(handler);
    self
  }

  pub fn add_handler(&mut self, handler: Arc<dyn CallbackHandler>) {
    trace!(handler = handler.name(), "handler attached");
    self.handlers.push(handler);
  }

  pub fn handlers(&self) -> &[Arc<dyn CallbackHandler>] {
    &self.handlers
  }

  pub fn is_empty(&self) -> bool {
    self.handlers.is_empty()
  }

  /// Delivers `event` to every handler.
  pub fn emit(&self, event: &CallbackEvent) {
    trace!(run_id = event.run_id(), kind = %event.kind(), "dispatching event");
    for handler in &self.handlers {
      event.dispatch(handler.as_ref());
    }
  }
}
