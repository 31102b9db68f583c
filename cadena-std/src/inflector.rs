//! String casing helpers for event name derivation.

/// Uppercase the first character of a word.
///
/// Empty input stays empty. Multi-byte first characters are handled
/// through `char::to_uppercase`.
pub fn ucfirst(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Join parts into one camel-cased word, uppercasing each part.
///
/// `["item", "save"]` becomes `ItemSave`.
pub fn implode<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    parts.into_iter().map(ucfirst).collect()
}
