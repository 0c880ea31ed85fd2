// src/error.rs
// =============================================================================
// Error types for the crawl engine.
//
// There are two kinds of failure and they are handled very differently:
// - CrawlError: configuration problems (bad root URL, unknown strategy, bad
//   settings). These are fatal and are returned before any page is fetched.
// - FetchError: a single page could not be downloaded. These never escape the
//   pipeline - the page just contributes zero links.
//
// Running out of time or requests under a limited strategy is NOT an error;
// the strategy simply returns what it has.
//
// Rust concepts:
// - thiserror: Derives std::error::Error and Display from attributes
// - #[from]: Lets the ? operator convert a source error automatically
// =============================================================================

use thiserror::Error;

// Errors that stop a crawl before it starts
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The root URL could not be parsed as an absolute URL
    #[error("invalid root URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The root URL parsed, but has no host to compare links against
    #[error("root URL has no host: {0}")]
    MissingHost(String),

    /// The strategy name is not one we know about
    #[error("unknown strategy '{0}' (expected one of: {names})", names = crate::crawl::StrategyKind::NAMES.join(", "))]
    UnknownStrategy(String),

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

// Errors for a single page fetch
//
// The pipeline logs these and drops the page; they are never returned to the
// caller of a crawl.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response is not an HTML page (image, PDF, ...)
    #[error("not an HTML page: {0}")]
    InvalidContentType(String),
}
