// src/widget/invalidator.rs

use log::trace;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Invalidation signal handed to a widget.
///
/// The widget calls `invalidate` after mutating its own state; every
/// subscribed listener is notified. Clones share the same listener set.
#[derive(Clone, Default)]
pub struct Invalidator {
  listeners: Arc<Mutex<HashMap<u32, Listener>>>,
  next_listener_id: Arc<Mutex<u32>>,
}

impl Invalidator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a listener and returns its id for `unsubscribe`.
  pub fn subscribe<F>(&self, listener: F) -> u32
  where
    F: Fn() + Send + Sync + 'static,
  {
    let id = {
      let mut id_guard = self.next_listener_id.lock();
      let current_id = *id_guard;
      *id_guard += 1;
      current_id
    };
    self.listeners.lock().insert(id, Arc::new(listener));
    id
  }

  pub fn unsubscribe(&self, listener_id: u32) {
    self.listeners.lock().remove(&listener_id);
  }

  pub fn listener_count(&self) -> usize {
    self.listeners.lock().len()
  }

  /// Notifies every listener that the widget's render output is stale.
  pub fn invalidate(&self) {
    // Clone all listeners to avoid holding the lock during callback invocation
    let listeners: Vec<Listener> = self.listeners.lock().values().cloned().collect();
    trace!("Invalidating, notifying {} listener(s)", listeners.len());
    for listener in listeners {
      listener();
    }
  }
}

impl std::fmt::Debug for Invalidator {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Invalidator")
      .field("listeners", &self.listener_count())
      .finish()
  }
}
