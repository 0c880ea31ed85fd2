// src/crawl/extract.rs
// =============================================================================
// Link extraction: which hrefs on a page belong to the site being crawled?
//
// An href is kept only if:
// 1. It parses as an absolute URL (relative or malformed hrefs are dropped)
// 2. Its hostname is the same as the reference URL's hostname
// 3. It is not a link back to the reference URL itself (same path + query)
//
// The href is returned exactly as written in the page, not normalized, so
// two spellings of the same page count as two entries. Only URL-string
// identity is used for de-duplication.
//
// Rust concepts:
// - HashSet: duplicates within a page collapse automatically
// - Pure functions: no I/O, no shared state, same input = same output
// =============================================================================

use std::collections::HashSet;
use url::Url;

use super::document::Document;

// Returns the set of same-host, non-self hrefs found in `document`
pub fn extract_links(document: &Document, reference: &Url) -> HashSet<String> {
    document
        .walk()
        .filter(|node| node.name == "a")
        .flat_map(|node| node.attr_values("href"))
        .filter(|href| is_same_host_link(href, reference))
        .map(str::to_string)
        .collect()
}

// Checks a single href against the reference URL
pub fn is_same_host_link(href: &str, reference: &Url) -> bool {
    let Ok(link) = Url::parse(href) else {
        return false;
    };
    match (link.host_str(), reference.host_str()) {
        (Some(host), Some(reference_host)) => {
            host == reference_host && request_uri(&link) != request_uri(reference)
        }
        _ => false,
    }
}

// Path plus query string, e.g. "/blog?page=2"
fn request_uri(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}
