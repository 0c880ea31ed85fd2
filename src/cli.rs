// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The strategy is taken as a plain string and parsed by the engine, so an
// unknown name is reported as a configuration error like any other.
// =============================================================================

use std::time::Duration;

use clap::Parser;

use crate::config::{CrawlConfig, Limits, DEFAULT_CONCURRENCY};

#[derive(Parser, Debug)]
#[command(
    name = "site-crawler",
    version,
    about = "Discover every page of a website by following same-host links",
    long_about = "site-crawler starts at a root URL and follows every link that stays on the same \
                  host, printing the sorted list of pages it found."
)]
pub struct Cli {
    /// The URL to start crawling from (must be absolute, e.g. https://example.com)
    #[arg(short, long)]
    pub url: String,

    /// Crawl strategy: OneLevel, Recursive, RecursiveParallel,
    /// RecursiveWithLimits or RecursiveParallelWithLimits
    #[arg(short, long, default_value = "RecursiveParallel")]
    pub alg: String,

    /// Time budget in milliseconds (limited strategies only)
    #[arg(long, default_value_t = 10_000)]
    pub millis: u64,

    /// Maximum number of pages to visit (limited strategies only)
    #[arg(long, default_value_t = 100)]
    pub requests: usize,

    /// Maximum number of pages fetched at once by the parallel strategies
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// User-Agent header to send
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Output results as JSON instead of one URL per line
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        let mut config = CrawlConfig {
            concurrency: self.concurrency,
            request_timeout: Duration::from_secs(self.timeout),
            ..CrawlConfig::default()
        };
        if let Some(ua) = &self.user_agent {
            config.user_agent = ua.clone();
        }
        config
    }

    pub fn limits(&self) -> Limits {
        Limits::from_millis(self.millis, self.requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["site-crawler", "--url", "https://example.com"]).unwrap();
        assert_eq!(cli.alg, "RecursiveParallel");
        assert_eq!(cli.limits(), Limits::from_millis(10_000, 100));
        assert_eq!(cli.crawl_config().concurrency, DEFAULT_CONCURRENCY);
        assert!(!cli.json);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "site-crawler",
            "-u",
            "https://example.com",
            "-a",
            "RecursiveWithLimits",
            "--millis",
            "250",
            "--requests",
            "3",
            "--user-agent",
            "test-bot",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.alg, "RecursiveWithLimits");
        assert_eq!(cli.limits(), Limits::from_millis(250, 3));
        assert_eq!(cli.crawl_config().user_agent, "test-bot");
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["site-crawler"]).is_err());
    }
}
