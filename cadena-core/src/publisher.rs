//! The event publisher contract.

use crate::{
    attributes::Attributes, error::PublishError, event::Event, identifier::Identifier,
    listener::EventListener, priority::Priority,
};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// A stable identity token for a publisher instance.
///
/// Handles are minted from a process-wide counter: no two publisher
/// instances ever share one, and a publisher keeps its handle for its whole
/// lifetime. Subscribers use the handle as a dictionary key to track which
/// publishers they are subscribed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublisherHandle(u64);

impl PublisherHandle {
    /// Mint a fresh, unique handle.
    pub fn new() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for PublisherHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifies one listener registration on one publisher.
///
/// Returned by [`EventPublisher::add_listener`] and accepted by
/// [`EventPublisher::remove_listener`]. A token only ever matches the
/// publisher that issued it; handing it to another publisher is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerToken {
    publisher: PublisherHandle,
    event: String,
    id: u64,
}

impl ListenerToken {
    /// Create a token. Publishers call this when registering a listener.
    pub fn new(publisher: PublisherHandle, event: impl Into<String>, id: u64) -> Self {
        Self {
            publisher,
            event: event.into(),
            id,
        }
    }

    /// The handle of the publisher that issued this token.
    pub fn publisher(&self) -> PublisherHandle {
        self.publisher
    }

    /// The event name the listener was registered under.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// The registration id, unique within the issuing publisher.
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// The registry and dispatch mechanism for named events.
///
/// Listeners are registered per event name with a [`Priority`]; publishing
/// invokes them in ascending priority order (stable on ties) until one of
/// them stops propagation. The mutated event is returned to the caller.
///
/// Registration takes `&self`: implementations guard their registry
/// internally so a publisher can be shared behind [`Arc`] and accept
/// listeners while dispatches are in flight.
pub trait EventPublisher: Send + Sync {
    /// The stable identity of this publisher instance.
    fn handle(&self) -> PublisherHandle;

    /// Register a listener for an event name.
    ///
    /// Fails with [`PublishError::InvalidArgument`] when the event name is
    /// empty.
    fn add_listener(
        &self,
        event: &str,
        listener: Arc<dyn EventListener>,
        priority: Priority,
    ) -> Result<ListenerToken, PublishError>;

    /// Remove a previously registered listener.
    ///
    /// Returns `false` (a no-op, not an error) when the token is unknown or
    /// was issued by a different publisher.
    fn remove_listener(&self, token: &ListenerToken) -> bool;

    /// Publish an event object to its registered listeners.
    ///
    /// Listeners run in ascending priority order; dispatch stops early when
    /// a listener stops propagation. With no listeners registered the event
    /// is returned unmodified.
    fn publish(&self, event: Event) -> Result<Event, PublishError>;

    /// Number of listeners currently registered for an event name.
    fn listener_count(&self, event: &str) -> usize;

    /// Build and publish an event from its parts.
    fn publish_event(
        &self,
        name: &str,
        attributes: Attributes,
        subject: Option<Identifier>,
    ) -> Result<Event, PublishError> {
        let mut event = Event::new(name).with_attributes(attributes);
        if let Some(subject) = subject {
            event = event.with_subject(subject);
        }
        self.publish(event)
    }
}
