// src/extract/address.rs
// =============================================================================
// Converts page-relative addresses (the ones starting with '/') into absolute
// addresses.
//
// This is deliberately a plain string operation, not a full URL resolver:
// - "/a/b" is joined onto the base with exactly one '/' between them
// - Anything else ("http://...", "img/x.png", "../y") is returned untouched
// =============================================================================

use url::Url;

/// Joins a root-relative `address` onto `base_url`.
///
/// Trailing slashes are stripped from the base and leading slashes from the
/// address, so the result never contains a doubled separator at the join.
/// Addresses that don't start with `/` pass through unchanged.
///
/// ```text
/// normalize("http://x.com/", "/a/b")        -> "http://x.com/a/b"
/// normalize("http://x.com/", "http://y.com") -> "http://y.com"
/// ```
pub fn normalize(base_url: &str, address: &str) -> String {
    if address.starts_with('/') {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            address.trim_start_matches('/')
        )
    } else {
        address.to_string()
    }
}

/// Returns `scheme://host[:port]` for a page URL.
///
/// A leading '/' in markup means "from the root of this site", so that is the
/// base the extractor joins root-relative addresses onto. If the page URL
/// can't be parsed (or has no host) it is returned as-is.
pub fn page_origin(page_url: &str) -> String {
    match Url::parse(page_url) {
        Ok(url) if url.has_host() => url.origin().ascii_serialization(),
        _ => page_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_address_joined_once() {
        assert_eq!(normalize("http://x.com/", "/a/b"), "http://x.com/a/b");
        assert_eq!(normalize("http://x.com", "/a/b"), "http://x.com/a/b");
        assert_eq!(normalize("http://x.com///", "///a/b"), "http://x.com/a/b");
    }

    #[test]
    fn test_absolute_address_unchanged() {
        assert_eq!(normalize("http://x.com/", "http://y.com/c"), "http://y.com/c");
    }

    #[test]
    fn test_relative_without_slash_unchanged() {
        // Known limitation: these are not resolved against the base
        assert_eq!(normalize("http://x.com/", "img/c.png"), "img/c.png");
        assert_eq!(normalize("http://x.com/", "../c.png"), "../c.png");
        assert_eq!(normalize("http://x.com/", ""), "");
    }

    #[test]
    fn test_page_origin() {
        assert_eq!(page_origin("http://example.test/page"), "http://example.test");
        assert_eq!(
            page_origin("https://example.test:8443/a/b?q=1"),
            "https://example.test:8443"
        );
        assert_eq!(page_origin("not a url"), "not a url");
    }
}
