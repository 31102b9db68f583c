//! Commands: named units of work dispatched through a chain.

use crate::{attributes::Attributes, identifier::Identifier};
use serde::{Deserialize, Serialize};

/// A named unit of work with a subject and an attribute bag.
///
/// Commands are created by a caller, handed to a
/// `CommandChain`, and passed mutably through every registered callback in
/// priority order. The name and subject are fixed at construction; the
/// attribute bag is the mutable working state callbacks share.
///
/// Command names follow a `when.scope.action` convention, e.g.
/// `before.item.save` or `after.render` — the leading segment tells the
/// event bridge whether the command fires before or after the operation it
/// wraps.
///
/// Cloning a command deep-copies the attribute bag and preserves the
/// subject, which is what the isolated dispatch mode of the event bridge
/// relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    name: String,
    subject: Option<Identifier>,
    attributes: Attributes,
}

impl Command {
    /// Create a command with no subject and an empty attribute bag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subject: None,
            attributes: Attributes::new(),
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

    /// The command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The subject this command acts on, if any.
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clone_deep_copies_attributes() {
        let mut attributes = Attributes::new();
        attributes.set("title", "draft");
        let original = Command::new("before.item.save")
            .with_subject(Identifier::new("blog", "article").with_path(["content"]))
            .with_attributes(attributes);

        let mut copy = original.clone();
        copy.attributes_mut().set("title", "final");

        assert_eq!(original.attributes().get("title"), Some(&json!("draft")));
        assert_eq!(copy.attributes().get("title"), Some(&json!("final")));
        assert_eq!(copy.subject(), original.subject());
    }
}
