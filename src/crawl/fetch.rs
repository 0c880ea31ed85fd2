// src/crawl/fetch.rs
// =============================================================================
// Downloading pages.
//
// The pipeline only needs "give me the body of this URL", so that contract
// is a trait. HttpFetcher is the real implementation on top of reqwest;
// tests plug in an in-memory site instead.
//
// Error policy:
// - Network failures, timeouts and unreadable bodies are FetchErrors
// - Responses that declare a non-HTML Content-Type are FetchErrors too; the
//   body is never downloaded
// - HTTP error statuses (404, 500, ...) are NOT errors: the body is still
//   returned and parsed, it just rarely contains useful links
//
// Rust concepts:
// - Traits + async_trait: async methods usable through Arc<dyn Fetcher>
// - Send + Sync bounds: the fetcher is shared across tokio tasks
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;

use crate::config::CrawlConfig;
use crate::error::{CrawlError, FetchError};

// A downloaded page
#[derive(Debug, Clone)]
pub struct Response {
    /// The URL that was requested
    pub url: String,
    /// HTTP status code (200 for in-memory fetchers)
    pub status: u16,
    pub body: String,
}

// Anything that can turn a URL into a page body
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Response, FetchError>;
}

// Fetcher backed by a shared reqwest client
//
// The client is created once and reused for every request so connections
// are pooled across the whole crawl.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Response, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        if !is_html(content_type) {
            return Err(FetchError::InvalidContentType(
                content_type.unwrap_or_default().to_string(),
            ));
        }
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "non-success status");
        }
        let body = response.text().await?;
        Ok(Response {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

// Pages without a Content-Type header get the benefit of the doubt
fn is_html(content_type: Option<&str>) -> bool {
    match content_type {
        Some(value) => value.to_ascii_lowercase().contains("html"),
        None => true,
    }
}
