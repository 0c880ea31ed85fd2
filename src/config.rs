// src/config.rs
// =============================================================================
// Configuration values handed to the crawl engine.
//
// Nothing here is global: the CLI resolves its flags into a CrawlConfig (and
// a Limits value for the limited strategies) and passes them to
// Crawler::new(). Tests build these structs directly.
// =============================================================================

use std::time::Duration;

use crate::error::CrawlError;

// Default bound on jobs running at once inside a parallel round
pub const DEFAULT_CONCURRENCY: usize = 32;

// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// Settings shared by every strategy
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum number of pages processed at the same time in a parallel round
    pub concurrency: usize,
    /// Timeout for a single HTTP request
    pub request_timeout: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: DEFAULT_TIMEOUT,
            user_agent: format!("site-crawler/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CrawlConfig {
    // Rejects values the engine cannot work with
    pub fn validate(&self) -> Result<(), CrawlError> {
        if self.concurrency == 0 {
            return Err(CrawlError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(CrawlError::InvalidConfig(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// Soft limits for the *WithLimits strategies
//
// Both caps are checked between rounds only. A round that has already
// started always runs to completion, so a crawl can overshoot either cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Wall-clock budget, measured from the start of the run
    pub duration: Duration,
    /// Stop once this many pages have been visited
    pub max_requests: usize,
}

impl Limits {
    pub fn new(duration: Duration, max_requests: usize) -> Self {
        Self {
            duration,
            max_requests,
        }
    }

    pub fn from_millis(millis: u64, max_requests: usize) -> Self {
        Self::new(Duration::from_millis(millis), max_requests)
    }
}
