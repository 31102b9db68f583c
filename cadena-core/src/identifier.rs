//! Object identifiers.

use serde::{Deserialize, Serialize};

/// Identifies the object a command acts on.
///
/// The identifier carries a `package`, an optional `path` of type segments,
/// and a `name`. The event bridge reads these to derive event names: the
/// first path segment is the subject *type* and the name is the subject
/// itself; when the path is empty the name doubles as the type.
///
/// For example `blog / [content] / article` describes the `article` content
/// object of the `blog` package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    package: String,
    path: Vec<String>,
    name: String,
}

impl Identifier {
    /// Create an identifier with an empty path.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            path: Vec::new(),
            name: name.into(),
        }
    }

    /// Set the path segments.
    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    /// The package this object belongs to.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The path segments between package and name.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The object name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.package)?;
        for segment in &self.path {
            write!(f, ".{segment}")?;
        }
        write!(f, ".{}", self.name)
    }
}
