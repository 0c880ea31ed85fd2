// src/crawl/frontier.rs
// =============================================================================
// Bookkeeping for a crawl: which URLs have we found, which have we visited?
//
// - discovered ("the frontier"): every URL seen so far, visited or not
// - visited: the URLs whose page has been fetched and scanned
//
// visited is always a subset of discovered. mark_visited() records the URL
// as discovered too, so no sequence of calls can break that.
//
// Sequential strategies own a Frontier directly. Parallel strategies share
// one through SharedFrontier, whose lock() hands out the same Frontier API
// behind a single mutex.
//
// Rust concepts:
// - HashSet: O(1) membership checks
// - Arc<Mutex<T>>: shared ownership + exclusive access across tasks
// =============================================================================

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

#[derive(Debug, Default, Clone)]
pub struct Frontier {
    discovered: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    // A frontier containing only `root`, not yet visited
    pub fn seeded(root: &str) -> Self {
        let mut frontier = Self::new();
        frontier.mark_discovered(root);
        frontier
    }

    // Returns true if the URL was new
    pub fn mark_discovered(&mut self, url: &str) -> bool {
        if self.discovered.contains(url) {
            return false;
        }
        self.discovered.insert(url.to_string())
    }

    pub fn mark_visited(&mut self, url: &str) {
        self.mark_discovered(url);
        self.visited.insert(url.to_string());
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    // Adds every link; returns how many were new
    pub fn merge<I>(&mut self, links: I) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        links
            .into_iter()
            .filter(|link| self.mark_discovered(link.as_ref()))
            .count()
    }

    // The URLs still waiting to be visited, copied out so the caller can
    // keep mutating the frontier while it works through them
    pub fn unvisited_snapshot(&self) -> Vec<String> {
        self.discovered
            .difference(&self.visited)
            .cloned()
            .collect()
    }

    // (discovered, visited)
    pub fn size(&self) -> (usize, usize) {
        (self.discovered.len(), self.visited.len())
    }

    // Nothing left to visit
    pub fn is_exhausted(&self) -> bool {
        self.discovered.len() == self.visited.len()
    }

    pub fn into_visited(self) -> HashSet<String> {
        self.visited
    }
}

// A Frontier shared between concurrent jobs
#[derive(Debug, Clone, Default)]
pub struct SharedFrontier {
    inner: Arc<Mutex<Frontier>>,
}

impl SharedFrontier {
    pub fn new(frontier: Frontier) -> Self {
        Self {
            inner: Arc::new(Mutex::new(frontier)),
        }
    }

    // Everything done through the guard is atomic with respect to other jobs
    pub fn lock(&self) -> MutexGuard<'_, Frontier> {
        self.inner.lock()
    }

    // Takes the frontier back out, leaving an empty one behind
    pub fn take(&self) -> Frontier {
        std::mem::take(&mut *self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_subset(frontier: &Frontier) {
        assert!(frontier.visited.is_subset(&frontier.discovered));
    }

    #[test]
    fn test_seeded_frontier() {
        let frontier = Frontier::seeded("https://example.com/");
        assert_eq!(frontier.size(), (1, 0));
        assert_eq!(frontier.unvisited_snapshot(), vec!["https://example.com/"]);
        assert!(!frontier.is_exhausted());
    }

    #[test]
    fn test_mark_visited_keeps_subset_invariant() {
        let mut frontier = Frontier::new();
        frontier.mark_visited("https://example.com/never-discovered");
        assert_subset(&frontier);
        assert_eq!(frontier.size(), (1, 1));
        assert!(frontier.is_exhausted());
    }

    #[test]
    fn test_merge_counts_new_links() {
        let mut frontier = Frontier::seeded("https://example.com/");
        let added = frontier.merge(["https://example.com/a", "https://example.com/b", "https://example.com/"]);
        assert_eq!(added, 2);
        assert_eq!(frontier.merge(vec!["https://example.com/a".to_string()]), 0);
        assert_eq!(frontier.size(), (3, 0));
    }

    #[test]
    fn test_snapshot_excludes_visited() {
        let mut frontier = Frontier::seeded("https://example.com/");
        frontier.merge(["https://example.com/a", "https://example.com/b"]);
        frontier.mark_visited("https://example.com/");

        let mut snapshot = frontier.unvisited_snapshot();
        snapshot.sort();
        assert_eq!(snapshot, vec!["https://example.com/a", "https://example.com/b"]);
        assert!(frontier.is_visited("https://example.com/"));
        assert!(!frontier.is_visited("https://example.com/a"));
        assert_subset(&frontier);
    }

    #[test]
    fn test_visiting_twice_is_harmless() {
        let mut frontier = Frontier::seeded("https://example.com/");
        frontier.mark_visited("https://example.com/");
        frontier.mark_visited("https://example.com/");
        assert_eq!(frontier.size(), (1, 1));
    }

    #[tokio::test]
    async fn test_shared_frontier_concurrent_updates() {
        let shared = SharedFrontier::new(Frontier::seeded("root"));
        let mut handles = Vec::new();
        for i in 0..50 {
            let shared = shared.clone();
            handles.push(tokio::spawn(async move {
                let mut frontier = shared.lock();
                frontier.merge([format!("page-{i}"), format!("page-{}", i % 5)]);
                frontier.mark_visited(&format!("page-{i}"));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let frontier = shared.take();
        assert_subset(&frontier);
        assert_eq!(frontier.size(), (51, 50));
        assert_eq!(shared.lock().size(), (0, 0));
    }
}
