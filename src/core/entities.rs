// src/core/entities.rs
// Character reference decoding for text and attribute values.
// Full HTML5 named set, legacy forms without a trailing `;` included.
// Unknown references are kept verbatim.

use std::borrow::Cow;

/// Decode references in text content.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    htmlize::unescape(s)
}

/// Decode references in an attribute value. A legacy reference followed by
/// an alphanumeric or `=` stays literal, so query strings survive.
pub fn decode_attr(s: &str) -> Cow<'_, str> {
    htmlize::unescape_attribute(s)
}
