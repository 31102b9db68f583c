//! The standard event publisher.

use cadena_core::{
    Event, EventListener, EventPublisher, ListenerToken, Priority, PublishError, PublisherHandle,
};
use std::collections::HashMap;
use std::sync::{
    Arc, RwLock,
    atomic::{AtomicU64, Ordering},
};

struct ListenerEntry {
    id: u64,
    priority: Priority,
    listener: Arc<dyn EventListener>,
}

/// The standard [`EventPublisher`] implementation.
///
/// Listeners are kept per event name in ascending priority order;
/// registrations with equal priority stay in registration order. The
/// registry sits behind a `RwLock`, so a broker shared behind
/// [`Arc`] accepts registrations from `&self` while dispatches are in
/// flight.
///
/// Publishing iterates over a snapshot of the listener list: a listener
/// may register or remove listeners on this same broker without
/// invalidating the dispatch it is part of. Changes take effect from the
/// next publish call.
pub struct EventBroker {
    handle: PublisherHandle,
    next_id: AtomicU64,
    listeners: RwLock<HashMap<String, Vec<ListenerEntry>>>,
}

impl EventBroker {
    /// Create a broker with a fresh [`PublisherHandle`].
    pub fn new() -> Self {
        Self {
            handle: PublisherHandle::new(),
            next_id: AtomicU64::new(1),
            listeners: RwLock::new(HashMap::new()),
        }
    }

    fn snapshot(&self, event: &str) -> Vec<Arc<dyn EventListener>> {
        let listeners = self.listeners.read().expect("listener registry poisoned");
        listeners
            .get(event)
            .map(|entries| entries.iter().map(|e| Arc::clone(&e.listener)).collect())
            .unwrap_or_default()
    }
}

impl Default for EventBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for EventBroker {
    fn handle(&self) -> PublisherHandle {
        self.handle
    }

    fn add_listener(
        &self,
        event: &str,
        listener: Arc<dyn EventListener>,
        priority: Priority,
    ) -> Result<ListenerToken, PublishError> {
        if event.is_empty() {
            return Err(PublishError::InvalidArgument(
                "event name must not be empty".into(),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut listeners = self.listeners.write().expect("listener registry poisoned");
        let entries = listeners.entry(event.to_string()).or_default();

        // Insert in priority order, FIFO among equal priorities.
        let pos = entries
            .iter()
            .position(|e| e.priority > priority)
            .unwrap_or(entries.len());
        entries.insert(
            pos,
            ListenerEntry {
                id,
                priority,
                listener,
            },
        );

        Ok(ListenerToken::new(self.handle, event, id))
    }

    fn remove_listener(&self, token: &ListenerToken) -> bool {
        if token.publisher() != self.handle {
            return false;
        }

        let mut listeners = self.listeners.write().expect("listener registry poisoned");
        let Some(entries) = listeners.get_mut(token.event()) else {
            return false;
        };

        let before = entries.len();
        entries.retain(|e| e.id != token.id());
        let removed = entries.len() < before;
        if entries.is_empty() {
            listeners.remove(token.event());
        }
        removed
    }

    fn publish(&self, mut event: Event) -> Result<Event, PublishError> {
        let snapshot = self.snapshot(event.name());
        tracing::debug!(
            event = event.name(),
            listeners = snapshot.len(),
            "publishing event"
        );

        for listener in snapshot {
            if let Err(source) = listener.on_event(&mut event) {
                return Err(PublishError::Listener {
                    event: event.name().to_string(),
                    source,
                });
            }
            if !event.can_propagate() {
                tracing::trace!(event = event.name(), "propagation stopped");
                break;
            }
        }

        Ok(event)
    }

    fn listener_count(&self, event: &str) -> usize {
        let listeners = self.listeners.read().expect("listener registry poisoned");
        listeners.get(event).map_or(0, Vec::len)
    }
}
