//! Events: named, propagation-controlled notifications.

use crate::{attributes::Attributes, identifier::Identifier};
use serde::{Deserialize, Serialize};

/// A named notification delivered to zero or more listeners.
///
/// An event starts out able to propagate; any listener may call
/// [`stop_propagation`](Event::stop_propagation) to prevent delivery to the
/// listeners that would run after it. The publisher returns the (possibly
/// mutated) event to its caller, so the caller can inspect both the final
/// attribute state and whether propagation survived.
///
/// The name is mutable: the event bridge publishes one event under its
/// specific name and, when propagation allows, renames the same event to
/// its generic name and publishes it again — a single propagation state
/// governing both rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    name: String,
    attributes: Attributes,
    subject: Option<Identifier>,
    propagate: bool,
}

impl Event {
    /// Create an event that propagates, with an empty attribute bag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            subject: None,
            propagate: true,
        }
    }

    /// Set the attribute bag.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the subject identifier.
    pub fn with_subject(mut self, subject: Identifier) -> Self {
        self.subject = Some(subject);
        self
    }

    /// The event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the event.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The subject this event concerns, if any.
    pub fn subject(&self) -> Option<&Identifier> {
        self.subject.as_ref()
    }

    /// The attribute bag.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Mutable access to the attribute bag.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Consume the event, yielding its attribute bag.
    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }

    /// Whether the event may still be delivered to further listeners.
    pub fn can_propagate(&self) -> bool {
        self.propagate
    }

    /// Stop delivery to the listeners that have not run yet.
    pub fn stop_propagation(&mut self) {
        self.propagate = false;
    }
}
