use cadena::Attributes;
use serde_json::Value;

/// Build an attribute bag from literal pairs.
pub fn attrs<const N: usize>(pairs: [(&str, Value); N]) -> Attributes {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
