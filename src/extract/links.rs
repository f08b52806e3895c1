// src/extract/links.rs
// =============================================================================
// Fetches a single page and extracts the addresses it links to.
//
// Only two kinds of element are looked at:
// - <img src="...">  (images embedded in the page)
// - <a href="...">   (anything the page links to)
//
// Results come back images first, then hyperlinks, each group in document
// order. Nothing is deduplicated and nothing is followed: this is one page,
// not a crawl.
//
// An optional extension acts as a coarse pre-filter: an element is kept if
// its address contains ".<ext>" ANYWHERE. The download pass applies the
// stricter "ends with .<ext>" check later.
// =============================================================================

use scraper::{Html, Selector};
use tracing::{debug, info};

use super::address::{normalize, page_origin};
use crate::config::FetchConfig;
use crate::fetch::{self, FetchError};

// Fetches `url` and returns the candidate addresses found on it.
//
// Returns:
//   Ok(addresses)     - the page was fetched (the list may be empty)
//   Err(FetchError)   - the page itself could not be fetched
//
// "No links on the page" and "couldn't get the page" are different outcomes,
// so callers never have to guess which one an empty list means.
pub async fn extract_links(
    config: &FetchConfig,
    url: &str,
    extension: Option<&str>,
) -> Result<Vec<String>, FetchError> {
    // The session lives only for this call and is dropped on return
    let client = fetch::open_session(config)?;

    let response = fetch::get(&client, url, config.timeout).await?;
    let body = fetch::read_body(response, config.timeout).await?;
    let html = String::from_utf8_lossy(&body);

    let links = parse_links(&html, url, extension);
    info!(url, count = links.len(), "extracted candidate links");
    Ok(links)
}

// Extracts candidate addresses from already-fetched HTML.
//
// Parameters:
//   html: the page body
//   page_url: the URL the page was fetched from (root-relative addresses are
//             joined onto its origin)
//   extension: optional pre-filter, without the leading '.'
pub fn parse_links(html: &str, page_url: &str, extension: Option<&str>) -> Vec<String> {
    let document = Html::parse_document(html);

    // Both selectors are constants, so parsing them can't fail at runtime
    let img_selector = Selector::parse("img[src]").unwrap();
    let a_selector = Selector::parse("a[href]").unwrap();

    let base = page_origin(page_url);
    let needle = extension.map(|ext| format!(".{}", ext));

    let images = document
        .select(&img_selector)
        .filter_map(|element| element.value().attr("src"));
    let anchors = document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"));

    let mut links = Vec::new();
    for address in images.chain(anchors) {
        if let Some(needle) = &needle {
            if !address.contains(needle.as_str()) {
                continue;
            }
        }
        let absolute = normalize(&base, address);
        debug!(address, absolute = absolute.as_str(), "candidate");
        links.push(absolute);
    }

    links
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does "img[src]" mean?
//    - A CSS selector: every <img> element that HAS a src attribute
//    - Elements without the attribute are never returned
//
// 2. What does .chain() do?
//    - Joins two iterators end to end: all images, then all anchors
//
// 3. Why is parse_links separate from extract_links?
//    - extract_links needs the network, parse_links only needs a string
//    - Tests can feed parse_links a fixture without starting a server
// -----------------------------------------------------------------------------
