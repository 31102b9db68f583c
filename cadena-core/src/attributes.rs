//! Ordered attribute bag carried by commands and events.

use crate::error::AttributeError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// An ordered mapping of attribute names to values.
///
/// Attributes travel with a [`Command`](crate::Command) through the chain
/// and with an [`Event`](crate::Event) to its listeners. Iteration order is
/// insertion order, so earlier callbacks see exactly what later callbacks
/// will see.
///
/// Two merge flavors exist because they serve different moments of the
/// pipeline:
///
/// - [`merge`](Attributes::merge) lets the other bag win — used when a
///   callback is re-registered and its parameters are combined.
/// - [`append`](Attributes::append) only fills in missing keys — used to
///   feed a callback's stored parameters into a command without clobbering
///   what the caller provided.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Get an attribute by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a mutable reference to an attribute by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Set an attribute, returning the previous value if one existed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove an attribute, returning its value if it existed.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Whether the bag contains the given key.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of attributes in the bag.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Merge another bag into this one; keys from `other` override.
    pub fn merge(&mut self, other: &Attributes) {
        for (key, value) in other.iter() {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Append another bag into this one; only keys not already present
    /// are added.
    pub fn append(&mut self, other: &Attributes) {
        for (key, value) in other.iter() {
            if !self.0.contains_key(key) {
                self.0.insert(key.clone(), value.clone());
            }
        }
    }

    /// Read an attribute as a concrete type.
    ///
    /// Fails with [`AttributeError::Missing`] when the key is absent and
    /// [`AttributeError::UnexpectedType`] when the stored value does not
    /// deserialize into `T`.
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<T, AttributeError> {
        let value = self.0.get(key).ok_or_else(|| AttributeError::Missing {
            key: key.to_string(),
        })?;
        serde_json::from_value(value.clone()).map_err(|_| AttributeError::UnexpectedType {
            key: key.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Attributes {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
