// src/crawl/strategy.rs
// =============================================================================
// Crawl strategies: in which order, and how concurrently, do we drain the
// frontier?
//
// All recursive strategies share one loop:
//
//   seed:   frontier = {root}, visited = {}
//   round:  pending = frontier - visited
//           if pending is empty -> done
//           otherwise visit every pending URL, merge the links it found,
//           mark it visited, and start the next round
//
// They differ only in how a round is processed:
// - OneLevel:           no rounds at all, just the root's own links
// - Recursive:          pending URLs one after another
// - RecursiveParallel:  pending URLs as concurrent jobs (bounded), the round
//                       ends when every job has finished
// - *WithLimits:        same as above, but a Budget is checked before each
//                       round and can end the crawl early
//
// Rust concepts:
// - Enums with data: RecursiveWithLimits carries its Limits
// - FromStr: turn a strategy name from the command line into an enum
// - buffer_unordered: run at most N futures at a time
// =============================================================================

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::time::Instant;
use url::Url;

use super::fetch::Fetcher;
use super::frontier::{Frontier, SharedFrontier};
use super::pipeline::discover;
use crate::config::Limits;
use crate::error::CrawlError;

// The strategy names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    OneLevel,
    Recursive,
    RecursiveParallel,
    RecursiveWithLimits,
    RecursiveParallelWithLimits,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::OneLevel,
        StrategyKind::Recursive,
        StrategyKind::RecursiveParallel,
        StrategyKind::RecursiveWithLimits,
        StrategyKind::RecursiveParallelWithLimits,
    ];

    pub const NAMES: [&'static str; 5] = [
        "OneLevel",
        "Recursive",
        "RecursiveParallel",
        "RecursiveWithLimits",
        "RecursiveParallelWithLimits",
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::OneLevel => "OneLevel",
            StrategyKind::Recursive => "Recursive",
            StrategyKind::RecursiveParallel => "RecursiveParallel",
            StrategyKind::RecursiveWithLimits => "RecursiveWithLimits",
            StrategyKind::RecursiveParallelWithLimits => "RecursiveParallelWithLimits",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = CrawlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CrawlError::UnknownStrategy(s.to_string()))
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// A fully configured strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    OneLevel,
    Recursive,
    RecursiveParallel,
    RecursiveWithLimits(Limits),
    RecursiveParallelWithLimits(Limits),
}

impl Strategy {
    // Builds a strategy from its name; limited strategies need `limits`
    pub fn from_kind(kind: StrategyKind, limits: Option<Limits>) -> Result<Self, CrawlError> {
        let strategy = match (kind, limits) {
            (StrategyKind::OneLevel, _) => Strategy::OneLevel,
            (StrategyKind::Recursive, _) => Strategy::Recursive,
            (StrategyKind::RecursiveParallel, _) => Strategy::RecursiveParallel,
            (StrategyKind::RecursiveWithLimits, Some(limits)) => {
                Strategy::RecursiveWithLimits(limits)
            }
            (StrategyKind::RecursiveParallelWithLimits, Some(limits)) => {
                Strategy::RecursiveParallelWithLimits(limits)
            }
            (kind, None) => {
                return Err(CrawlError::InvalidConfig(format!(
                    "strategy {kind} requires a time limit and a request limit"
                )))
            }
        };
        Ok(strategy)
    }

    // Parses a strategy name, e.g. "RecursiveParallel"
    pub fn from_name(name: &str, limits: Option<Limits>) -> Result<Self, CrawlError> {
        Self::from_kind(name.parse()?, limits)
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::OneLevel => StrategyKind::OneLevel,
            Strategy::Recursive => StrategyKind::Recursive,
            Strategy::RecursiveParallel => StrategyKind::RecursiveParallel,
            Strategy::RecursiveWithLimits(_) => StrategyKind::RecursiveWithLimits,
            Strategy::RecursiveParallelWithLimits(_) => StrategyKind::RecursiveParallelWithLimits,
        }
    }

    pub fn limits(&self) -> Option<Limits> {
        match self {
            Strategy::RecursiveWithLimits(limits)
            | Strategy::RecursiveParallelWithLimits(limits) => Some(*limits),
            _ => None,
        }
    }
}

// What a strategy needs to do its job
#[derive(Clone)]
pub struct CrawlContext {
    pub fetcher: Arc<dyn Fetcher>,
    pub root: Url,
    /// Upper bound on concurrent jobs in a parallel round
    pub concurrency: usize,
}

impl Strategy {
    // Runs the strategy and returns every URL it visited (or, for OneLevel,
    // every URL found on the root page)
    pub async fn execute(&self, ctx: &CrawlContext) -> HashSet<String> {
        match self {
            Strategy::OneLevel => one_level(ctx).await,
            Strategy::Recursive => recursive(ctx, None).await.into_visited(),
            Strategy::RecursiveParallel => recursive_parallel(ctx, None).await.into_visited(),
            Strategy::RecursiveWithLimits(limits) => {
                recursive(ctx, Some(Budget::start(*limits))).await.into_visited()
            }
            Strategy::RecursiveParallelWithLimits(limits) => {
                recursive_parallel(ctx, Some(Budget::start(*limits)))
                    .await
                    .into_visited()
            }
        }
    }
}

// Soft limits armed at the start of a run
#[derive(Debug, Clone, Copy)]
struct Budget {
    limits: Limits,
    deadline: Instant,
}

impl Budget {
    fn start(limits: Limits) -> Self {
        Self {
            limits,
            deadline: Instant::now() + limits.duration,
        }
    }

    // Checked between rounds only; an in-flight round always completes
    fn exhausted(&self, visited: usize) -> bool {
        if visited >= self.limits.max_requests {
            tracing::info!(visited, max_requests = self.limits.max_requests, "request limit reached");
            return true;
        }
        if Instant::now() >= self.deadline {
            tracing::info!(visited, duration = ?self.limits.duration, "time limit reached");
            return true;
        }
        false
    }
}

async fn one_level(ctx: &CrawlContext) -> HashSet<String> {
    discover(ctx.fetcher.clone(), ctx.root.as_str(), &ctx.root).await
}

async fn recursive(ctx: &CrawlContext, budget: Option<Budget>) -> Frontier {
    let mut frontier = Frontier::seeded(ctx.root.as_str());
    let mut round = 0usize;

    loop {
        if budget.is_some_and(|b| b.exhausted(frontier.size().1)) {
            break;
        }
        if frontier.is_exhausted() {
            break;
        }
        let pending = frontier.unvisited_snapshot();
        round += 1;
        tracing::debug!(round, pending = pending.len(), "starting round");

        for url in pending {
            if frontier.is_visited(&url) {
                continue;
            }
            let links = discover(ctx.fetcher.clone(), &url, &ctx.root).await;
            let added = frontier.merge(links);
            frontier.mark_visited(&url);
            tracing::trace!(url = %url, added, "visited");
        }

        let (discovered, visited) = frontier.size();
        tracing::debug!(round, discovered, visited, "round finished");
    }

    frontier
}

async fn recursive_parallel(ctx: &CrawlContext, budget: Option<Budget>) -> Frontier {
    let shared = SharedFrontier::new(Frontier::seeded(ctx.root.as_str()));
    let mut round = 0usize;

    loop {
        let (visited, pending) = {
            let frontier = shared.lock();
            (frontier.size().1, frontier.unvisited_snapshot())
        };
        if budget.is_some_and(|b| b.exhausted(visited)) {
            break;
        }
        // Nothing left to visit: fixed point reached
        if pending.is_empty() {
            break;
        }
        round += 1;
        tracing::debug!(round, pending = pending.len(), "starting parallel round");

        // Jobs are spawned lazily as buffer_unordered pulls them, so no more
        // than `concurrency` are alive at once
        stream::iter(pending)
            .map(|url| {
                let job = tokio::spawn(visit(
                    ctx.fetcher.clone(),
                    url.clone(),
                    ctx.root.clone(),
                    shared.clone(),
                ));
                let shared = shared.clone();
                async move {
                    if let Err(e) = job.await {
                        tracing::warn!(url = %url, error = %e, "crawl job failed");
                        shared.lock().mark_visited(&url);
                    }
                }
            })
            .buffer_unordered(ctx.concurrency)
            .collect::<Vec<()>>()
            .await;

        let (discovered, visited) = shared.lock().size();
        tracing::debug!(round, discovered, visited, "parallel round finished");
    }

    shared.take()
}

// One parallel job: fetch + parse + extract + collect, then a single locked
// update of the shared frontier
async fn visit(fetcher: Arc<dyn Fetcher>, url: String, root: Url, shared: SharedFrontier) {
    let links = discover(fetcher, &url, &root).await;
    let mut frontier = shared.lock();
    let added = frontier.merge(links);
    frontier.mark_visited(&url);
    tracing::trace!(url = %url, added, "visited");
}
