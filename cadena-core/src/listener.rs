//! Event listeners.

use crate::{error::BoxError, event::Event};
use std::sync::Arc;

/// A handler invoked when a matching event is published.
///
/// Listeners receive the event mutably: they may change its attributes
/// (visible to later listeners and to the publisher's caller) and may call
/// [`Event::stop_propagation`] to prevent delivery to the listeners that
/// would run after them.
///
/// Errors are not swallowed: a listener returning `Err` aborts the
/// remainder of the publish call and surfaces to the publisher's caller.
pub trait EventListener: Send + Sync {
    /// Called when an event this listener is registered for is published.
    fn on_event(&self, event: &mut Event) -> Result<(), BoxError>;
}

/// An [`EventListener`] backed by a plain function or closure.
///
/// Built with [`listener_fn`].
pub struct FnListener<F> {
    f: F,
}

impl<F> EventListener for FnListener<F>
where
    F: Fn(&mut Event) -> Result<(), BoxError> + Send + Sync,
{
    fn on_event(&self, event: &mut Event) -> Result<(), BoxError> {
        (self.f)(event)
    }
}

/// Wrap a function or closure as a shared [`EventListener`].
///
/// ```rust,ignore
/// let token = broker.add_listener(
///     "onBeforeSave",
///     listener_fn(|event| {
///         event.attributes_mut().set("seen", true);
///         Ok(())
///     }),
///     Priority::NORMAL,
/// )?;
/// ```
pub fn listener_fn<F>(f: F) -> Arc<dyn EventListener>
where
    F: Fn(&mut Event) -> Result<(), BoxError> + Send + Sync + 'static,
{
    Arc::new(FnListener { f })
}
