//! Encoding and decoding of the five predefined XML entities
//!
//! All functions borrow their input when there is nothing to substitute.

use std::borrow::Cow;

use memchr::{memchr, memchr3};

/// Escape `&`, `<` and `>` for element content.
///
/// `&` is replaced first so the ampersands introduced by the other
/// substitutions are never escaped twice.
pub fn encode(text: &str) -> Cow<'_, str> {
    if memchr3(b'&', b'<', b'>', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    )
}

/// Escape text for a quoted attribute value: [`encode`] plus both quote kinds.
pub fn encode_attribute(text: &str) -> Cow<'_, str> {
    let encoded = encode(text);
    if memchr::memchr2(b'"', b'\'', encoded.as_bytes()).is_none() {
        return encoded;
    }
    Cow::Owned(encoded.replace('"', "&quot;").replace('\'', "&apos;"))
}

/// Reverse the five predefined entities.
///
/// `&amp;` is decoded last, otherwise `&amp;lt;` would collapse to `<`.
pub fn decode(text: &str) -> Cow<'_, str> {
    if memchr(b'&', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&"),
    )
}
