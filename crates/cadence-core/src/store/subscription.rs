//! Cancelable push subscriptions to stored documents.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;

/// Handle to a live document subscription.
///
/// Dropping the handle cancels the subscription, as does [`cancel`]. Once
/// either returns, no further callback starts; a callback that was already
/// running has finished.
///
/// [`cancel`]: Subscription::cancel
#[must_use = "dropping a subscription cancels it"]
pub struct Subscription {
    gate: Arc<Gate>,
    task: JoinHandle<()>,
}

impl Subscription {
    pub(super) fn new(gate: Arc<Gate>, task: JoinHandle<()>) -> Self {
        Self { gate, task }
    }

    /// Stops delivery.
    pub fn cancel(self) {}

    /// Whether callbacks are still being delivered.
    pub fn is_active(&self) -> bool {
        self.gate.is_open() && !self.task.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.gate.close();
        self.task.abort();
    }
}

/// Serializes callback delivery against cancellation.
///
/// Callbacks run while holding the lock, so closing waits for a running
/// callback and every later delivery sees the gate closed. A callback must
/// therefore not drop its own subscription.
#[derive(Debug)]
pub(super) struct Gate {
    open: Mutex<bool>,
}

impl Gate {
    pub(super) fn new() -> Self {
        Self {
            open: Mutex::new(true),
        }
    }

    /// Runs `deliver` unless the gate has been closed.
    pub(super) fn pass(&self, deliver: impl FnOnce()) {
        let open = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        if *open {
            deliver();
        }
    }

    fn close(&self) {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }

    fn is_open(&self) -> bool {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
