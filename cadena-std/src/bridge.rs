//! The command → event bridge.
//!
//! Translates a dispatched command into `onWhen...` event names and hands
//! it to an event publisher, so subscribers observe the command lifecycle
//! without being registered on the chain themselves.

use crate::inflector::{implode, ucfirst};
use cadena_core::{
    BoxError, ChainContext, ChainError, Command, CommandCallback, EventPublisher, Priority,
};
use std::sync::Arc;

/// How the bridge exposes the command's attributes to listeners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchMode {
    /// Listeners work on the live attribute state: after both publishes,
    /// the final event attributes are written back into the command, so
    /// mutations made by listeners are visible to later callbacks in the
    /// chain and to the chain's caller.
    #[default]
    Shared,
    /// Listeners work on a copy: the command's attributes are cloned into
    /// the event and never written back.
    Isolated,
}

/// A [`CommandCallback`] that republishes commands as events.
///
/// For a command named `when.rest...` with a subject identifier
/// `{package, path, name}`, two event names are derived:
///
/// - **specific**: `on` + `When` + `Package` + `Name` + `Type` + `Rest...`
/// - **generic**: `on` + `When` + `Type` + `Rest...`
///
/// where `Type` is the first path segment (or the identifier name when the
/// path is empty) and `Name` is the identifier name when a path is
/// present. Without a subject both reduce to `on` + `When` + `Rest...`.
///
/// The specific event publishes first. When it still propagates and the
/// two names differ, the same event is renamed to the generic name and
/// published again — a listener stopping propagation on the specific round
/// suppresses the generic round.
///
/// The bridge is conventionally registered at [`Priority::LOWEST`]
/// (see [`EventBridge::DEFAULT_PRIORITY`]) so ordinary callbacks observe
/// the command before it fans out to listeners.
pub struct EventBridge {
    publisher: Arc<dyn EventPublisher>,
    mode: DispatchMode,
}

impl EventBridge {
    /// The priority the bridge is conventionally registered at.
    pub const DEFAULT_PRIORITY: Priority = Priority::LOWEST;

    /// Create a bridge in [`DispatchMode::Shared`].
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            publisher,
            mode: DispatchMode::Shared,
        }
    }

    /// Start building a bridge.
    pub fn builder() -> EventBridgeBuilder {
        EventBridgeBuilder::default()
    }

    /// Whether listeners receive a copy of the command's attributes.
    pub fn is_isolated(&self) -> bool {
        self.mode == DispatchMode::Isolated
    }

    /// The publisher events are handed to.
    pub fn publisher(&self) -> &Arc<dyn EventPublisher> {
        &self.publisher
    }
}

/// Builder for [`EventBridge`].
///
/// The publisher is required; [`build`](EventBridgeBuilder::build) fails
/// with [`ChainError::InvalidArgument`] when it was never supplied.
#[derive(Default)]
pub struct EventBridgeBuilder {
    publisher: Option<Arc<dyn EventPublisher>>,
    mode: DispatchMode,
}

impl EventBridgeBuilder {
    /// Set the event publisher.
    pub fn publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Set the dispatch mode.
    pub fn mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Build the bridge.
    pub fn build(self) -> Result<EventBridge, ChainError> {
        let publisher = self.publisher.ok_or_else(|| {
            ChainError::InvalidArgument("an event publisher is required".into())
        })?;
        Ok(EventBridge {
            publisher,
            mode: self.mode,
        })
    }
}

impl CommandCallback for EventBridge {
    fn execute(&self, command: &mut Command, _context: &mut ChainContext) -> Result<(), BoxError> {
        let (specific, generic) = event_names(command)?;

        let mut event = self.publisher.publish_event(
            &specific,
            command.attributes().clone(),
            command.subject().cloned(),
        )?;

        if event.can_propagate() && specific != generic {
            event.set_name(generic);
            event = self.publisher.publish(event)?;
        }

        if self.mode == DispatchMode::Shared {
            *command.attributes_mut() = event.into_attributes();
        }

        Ok(())
    }
}

/// Derive the specific and generic event names for a command.
pub(crate) fn event_names(command: &Command) -> Result<(String, String), ChainError> {
    let mut package = "";
    let mut subject_type = "";
    let mut subject_name = "";

    if let Some(identifier) = command.subject() {
        package = identifier.package();
        if let Some(first) = identifier.path().first() {
            subject_type = first;
            subject_name = identifier.name();
        } else {
            subject_type = identifier.name();
        }
    }

    let mut parts = command.name().split('.');
    let when = match parts.next() {
        Some(when) if !when.is_empty() => when,
        _ => {
            return Err(ChainError::InvalidArgument(
                "command name must not be empty".into(),
            ));
        }
    };
    let rest = implode(parts);

    let specific = format!(
        "on{}{}{}{}{}",
        ucfirst(when),
        ucfirst(package),
        ucfirst(subject_name),
        ucfirst(subject_type),
        rest
    );
    let generic = format!("on{}{}{}", ucfirst(when), ucfirst(subject_type), rest);

    Ok((specific, generic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadena_core::Identifier;

    #[test]
    fn derives_specific_and_generic_names() {
        let command = Command::new("before.item.save")
            .with_subject(Identifier::new("blog", "article").with_path(["content"]));

        let (specific, generic) = event_names(&command).unwrap();
        assert_eq!(specific, "onBeforeBlogArticleContentItemSave");
        assert_eq!(generic, "onBeforeContentItemSave");
    }

    #[test]
    fn pathless_subject_uses_its_name_as_type() {
        let command =
            Command::new("after.render").with_subject(Identifier::new("blog", "article"));

        let (specific, generic) = event_names(&command).unwrap();
        assert_eq!(specific, "onAfterBlogArticleRender");
        assert_eq!(generic, "onAfterArticleRender");
    }

    #[test]
    fn names_coincide_without_a_subject() {
        let command = Command::new("before.item.save");

        let (specific, generic) = event_names(&command).unwrap();
        assert_eq!(specific, "onBeforeItemSave");
        assert_eq!(specific, generic);
    }

    #[test]
    fn empty_command_name_is_rejected() {
        let command = Command::new("");
        assert!(matches!(
            event_names(&command),
            Err(ChainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn builder_requires_a_publisher() {
        assert!(matches!(
            EventBridge::builder().build(),
            Err(ChainError::InvalidArgument(_))
        ));
    }
}
