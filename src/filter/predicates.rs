// src/filter/predicates.rs
// =============================================================================
// The two matching strategies used by the download pass.
//
// Both are exact and case-sensitive:
// - extension_matches: the address must END with ".<ext>"
// - content_type_matches: the Content-Type header must START with the category
//
// The header check is a raw prefix compare on the whole header value, so
// "image/png; charset=binary" matches "image" but not "Image".
// =============================================================================

use reqwest::header::{HeaderMap, CONTENT_TYPE};

pub fn extension_matches(address: &str, extension: &str) -> bool {
    address.ends_with(&format!(".{}", extension))
}

/// A missing or non-text Content-Type header never matches.
pub fn content_type_matches(headers: &HeaderMap, category: &str) -> bool {
    content_type(headers).is_some_and(|value| value.starts_with(category))
}

/// Returns the Content-Type header as text, if present and readable
pub fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}
