//! Event subscribers: objects that register a set of their own listeners.

use crate::{
    error::PublishError,
    listener::EventListener,
    priority::Priority,
    publisher::{EventPublisher, ListenerToken, PublisherHandle},
};
use std::collections::HashMap;
use std::sync::Arc;

/// Per-subscriber bookkeeping of what was registered where.
///
/// Keyed by [`PublisherHandle`], so one subscriber can be subscribed to
/// several publishers independently. The provided methods of
/// [`EventSubscriber`] read and update this set; implementors only need to
/// own one and hand out access to it.
#[derive(Debug, Default)]
pub struct Subscriptions {
    registered: HashMap<PublisherHandle, Vec<ListenerToken>>,
}

impl Subscriptions {
    /// Create an empty subscription set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether listeners are recorded for the given publisher.
    pub fn contains(&self, handle: PublisherHandle) -> bool {
        self.registered.contains_key(&handle)
    }

    /// Record the tokens registered against a publisher.
    pub fn record(&mut self, handle: PublisherHandle, tokens: Vec<ListenerToken>) {
        self.registered.insert(handle, tokens);
    }

    /// Forget and return the tokens recorded for a publisher.
    ///
    /// Returns an empty vector when nothing was recorded.
    pub fn release(&mut self, handle: PublisherHandle) -> Vec<ListenerToken> {
        self.registered.remove(&handle).unwrap_or_default()
    }

    /// The tokens currently recorded for a publisher.
    pub fn tokens(&self, handle: PublisherHandle) -> &[ListenerToken] {
        self.registered.get(&handle).map_or(&[], Vec::as_slice)
    }
}

/// An object that knows which events it is interested in.
///
/// Implementors declare their listener set explicitly through
/// [`listeners`](EventSubscriber::listeners) — one `(event name, handler)`
/// pair per event — and own a [`Subscriptions`] set the provided methods
/// use for bookkeeping.
///
/// The listener set is snapshotted when [`subscribe`](EventSubscriber::subscribe)
/// runs: whatever `listeners` would return later is never picked up until
/// the subscriber unsubscribes and subscribes again.
pub trait EventSubscriber: Send + Sync {
    /// The events this subscriber handles, with their handlers.
    fn listeners(&self) -> Vec<(String, Arc<dyn EventListener>)>;

    /// Access the subscription bookkeeping.
    fn subscriptions(&self) -> &Subscriptions;

    /// Mutable access to the subscription bookkeeping.
    fn subscriptions_mut(&mut self) -> &mut Subscriptions;

    /// Register every declared listener with the publisher.
    ///
    /// Idempotent: when this subscriber is already subscribed to the
    /// publisher (checked through
    /// [`is_subscribed`](EventSubscriber::is_subscribed)) nothing happens.
    /// On a registration failure, listeners registered so far are removed
    /// again before the error is returned.
    fn subscribe(
        &mut self,
        publisher: &dyn EventPublisher,
        priority: Priority,
    ) -> Result<(), PublishError> {
        let handle = publisher.handle();
        if self.subscriptions().contains(handle) {
            return Ok(());
        }

        let mut tokens = Vec::new();
        for (event, listener) in self.listeners() {
            match publisher.add_listener(&event, listener, priority) {
                Ok(token) => tokens.push(token),
                Err(err) => {
                    for token in &tokens {
                        publisher.remove_listener(token);
                    }
                    return Err(err);
                }
            }
        }

        self.subscriptions_mut().record(handle, tokens);
        Ok(())
    }

    /// Remove every listener this subscriber registered with the publisher.
    ///
    /// A no-op when not subscribed. Listeners registered by anyone else are
    /// left untouched.
    fn unsubscribe(&mut self, publisher: &dyn EventPublisher) {
        for token in self.subscriptions_mut().release(publisher.handle()) {
            publisher.remove_listener(&token);
        }
    }

    /// Whether this subscriber is currently subscribed to the publisher.
    fn is_subscribed(&self, publisher: &dyn EventPublisher) -> bool {
        self.subscriptions().contains(publisher.handle())
    }
}
