// src/crawl/mod.rs
// =============================================================================
// This module holds the crawl engine.
//
// Submodules, leaves first:
// - document: owned HTML element tree
// - extract:  which hrefs belong to the site (same host, not the root)
// - fetch:    the Fetcher trait and its reqwest implementation
// - pipeline: fetch -> parse -> extract -> collect, one task per stage
// - frontier: discovered/visited bookkeeping, plain or behind a lock
// - strategy: OneLevel, Recursive, RecursiveParallel and the limited variants
// - result:   sorting the final list, JSON report
// - engine:   Crawler, the public entry point tying it all together
// =============================================================================

mod document;
mod engine;
mod extract;
mod fetch;
mod frontier;
mod pipeline;
mod result;
mod strategy;

pub use engine::{crawl, Crawler};
pub use fetch::{Fetcher, Response};
pub use result::CrawlReport;
pub use strategy::{Strategy, StrategyKind};

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is everything a set until the very end?
//    - Pages are visited in no particular order (especially in parallel)
//    - Only the final list is sorted, so results are stable across runs
//
// 2. Why do strategies never see channels?
//    - The pipeline joins its own tasks in collect()
//    - A strategy just awaits a HashSet per page, which keeps the scheduling
//      logic (rounds, limits, concurrency) readable
//
// 3. Where does concurrency come from?
//    - Inside one page: the pipeline stages run as separate tasks
//    - Across pages: only the *Parallel strategies run pages at the same
//      time, bounded by CrawlConfig::concurrency
// -----------------------------------------------------------------------------
