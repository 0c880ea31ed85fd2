// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (to stderr, so stdout only carries results)
// 3. Hand the root URL and strategy name to the crawl engine
// 4. Print the sorted list of pages, as plain lines or JSON
// 5. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - CrawlConfig and Limits
mod crawl;    // src/crawl/ - the crawl engine
mod error;    // src/error.rs - error types

#[cfg(test)]
mod test_support;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use crawl::CrawlReport;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let started = Instant::now();
    let pages = crawl::crawl(&cli.url, &cli.alg, Some(cli.limits()), cli.crawl_config())
        .await
        .with_context(|| format!("crawl of {} failed", cli.url))?;
    let elapsed = started.elapsed();

    tracing::info!(pages = pages.len(), elapsed_ms = elapsed.as_millis() as u64, "done");

    let report = CrawlReport::new(&cli.url, &cli.alg, elapsed.as_millis(), pages);
    print_results(&report, cli.json)?;

    Ok(0)
}

// -v maps to info, -vv to debug, -vvv and beyond to trace
fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn print_results(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        for page in &report.pages {
            println!("{}", page);
        }
    }
    Ok(())
}
