// src/test_support.rs
// =============================================================================
// Helpers shared by the unit tests (compiled only for `cargo test`).
//
// - StaticSite: an in-memory Fetcher serving a fixed link graph and counting
//   how often each URL was requested (unknown URLs answer 404)
// - serve_pages: a tiny HTTP/1.1 server on 127.0.0.1 for exercising the
//   real reqwest-based fetcher
// =============================================================================

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::crawl::{Fetcher, Response};
use crate::error::FetchError;

// In-memory website: URL -> HTML body
#[derive(Default)]
pub struct StaticSite {
    pages: HashMap<String, String>,
    binary: HashSet<String>,
    calls: Mutex<HashMap<String, usize>>,
    delay: Option<Duration>,
}

impl StaticSite {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds a page whose body is a list of anchors to `links`
    pub fn page(mut self, url: &str, links: &[&str]) -> Self {
        let anchors: String = links
            .iter()
            .map(|link| format!("<li><a href=\"{link}\">{link}</a></li>"))
            .collect();
        let body = format!("<html><body><ul>{anchors}</ul></body></html>");
        self.pages.insert(url.to_string(), body);
        self
    }

    // Adds a page with a raw body
    pub fn raw(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    // A URL that answers with an image instead of HTML
    pub fn binary(mut self, url: &str) -> Self {
        self.binary.insert(url.to_string());
        self
    }

    // Every fetch sleeps this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().get(url).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }
}

#[async_trait]
impl Fetcher for StaticSite {
    async fn fetch(&self, url: &str) -> Result<Response, FetchError> {
        *self.calls.lock().entry(url.to_string()).or_insert(0) += 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.binary.contains(url) {
            return Err(FetchError::InvalidContentType("image/png".to_string()));
        }
        let (status, body) = match self.pages.get(url) {
            Some(body) => (200, body.clone()),
            None => (404, "not found".to_string()),
        };
        Ok(Response {
            url: url.to_string(),
            status,
            body,
        })
    }
}

// Starts a background HTTP server answering GET <path> from `pages`
//
// Returns the base URL, e.g. "http://127.0.0.1:41234". Any "{base}" in a
// body is replaced with it, so pages can link to each other absolutely.
// Unknown paths get a 404. Every connection is closed after one response.
pub async fn serve_pages(pages: Vec<(&'static str, u16, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let pages: HashMap<&'static str, (u16, String)> = pages
        .into_iter()
        .map(|(path, status, body)| (path, (status, body.replace("{base}", &base))))
        .collect();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let pages = pages.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = pages
                    .get(path)
                    .cloned()
                    .unwrap_or((404, "not found".to_string()));
                let response = format!(
                    "HTTP/1.1 {status} Status\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    base
}

// A reqwest client that ignores proxy environment variables
pub fn local_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
