//! Broadcast event bus for distributing `SessionEvent` to rendering layers.
//!
//! Built on `tokio::sync::broadcast`, the `EventBus` supports any number of
//! subscribers. Publishing with no active subscribers is a no-op, so a
//! session works the same whether or not anything is watching it.

use concierge_types::event::SessionEvent;
use tokio::sync::broadcast;

/// Default channel capacity; a slow renderer lags rather than blocks the session.
pub const DEFAULT_CAPACITY: usize = 256;

/// Multi-consumer bus for chat session events.
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a new subscriber that will receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: SessionEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
