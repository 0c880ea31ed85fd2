// src/crawl/engine.rs
// =============================================================================
// The Crawler: a root URL, a strategy and a fetcher, ready to run.
//
// Construction is where every configuration error is caught (bad URL,
// unknown strategy, bad settings). Once a Crawler exists, run() cannot fail:
// unreachable pages and exhausted limits just produce a smaller result.
//
// Every run() starts from a fresh frontier, so running the same Crawler
// twice crawls the site twice.
// =============================================================================

use std::sync::Arc;

use url::Url;

use super::fetch::{Fetcher, HttpFetcher};
use super::result::map_to_list;
use super::strategy::{CrawlContext, Strategy};
use crate::config::{CrawlConfig, Limits};
use crate::error::CrawlError;

pub struct Crawler {
    root: Url,
    strategy: Strategy,
    config: CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
}

impl Crawler {
    // Creates a crawler that fetches pages over HTTP
    pub fn new(root: &str, strategy: Strategy, config: CrawlConfig) -> Result<Self, CrawlError> {
        config.validate()?;
        let fetcher = Arc::new(HttpFetcher::new(&config)?);
        Self::with_fetcher(root, strategy, config, fetcher)
    }

    // Creates a crawler with a custom page source
    pub fn with_fetcher(
        root: &str,
        strategy: Strategy,
        config: CrawlConfig,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, CrawlError> {
        config.validate()?;
        Ok(Self {
            root: parse_root(root)?,
            strategy,
            config,
            fetcher,
        })
    }

    // Crawls the site and returns the discovered pages, sorted
    //
    // The root itself is never part of the result.
    pub async fn run(&self) -> Vec<String> {
        let ctx = CrawlContext {
            fetcher: self.fetcher.clone(),
            root: self.root.clone(),
            concurrency: self.config.concurrency,
        };
        tracing::info!(
            root = %self.root,
            strategy = %self.strategy.kind(),
            limits = ?self.strategy.limits(),
            "crawl started"
        );

        let mut visited = self.strategy.execute(&ctx).await;
        visited.remove(self.root.as_str());

        tracing::info!(pages = visited.len(), "crawl finished");
        map_to_list(visited)
    }
}

// Parses the root URL; it must be absolute and have a host
pub fn parse_root(root: &str) -> Result<Url, CrawlError> {
    let url = Url::parse(root).map_err(|source| CrawlError::InvalidUrl {
        url: root.to_string(),
        source,
    })?;
    if url.host_str().is_none() {
        return Err(CrawlError::MissingHost(root.to_string()));
    }
    Ok(url)
}

// One-call entry point: resolve the strategy by name and crawl
pub async fn crawl(
    root: &str,
    strategy: &str,
    limits: Option<Limits>,
    config: CrawlConfig,
) -> Result<Vec<String>, CrawlError> {
    let strategy = Strategy::from_name(strategy, limits)?;
    let crawler = Crawler::new(root, strategy, config)?;
    Ok(crawler.run().await)
}
