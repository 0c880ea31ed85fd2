// src/crawl/result.rs
// =============================================================================
// Turning the visited set into something printable.
//
// Sets have no order, so the final list is sorted once, at the very end of
// a run. Nothing before that point may assume any ordering.
// =============================================================================

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

// Sorts a set of URLs lexicographically
pub fn map_to_list(links: HashSet<String>) -> Vec<String> {
    let mut list: Vec<String> = links.into_iter().collect();
    list.sort();
    list
}

// Everything the CLI reports about one crawl (used for --json output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlReport {
    /// The root URL the crawl started from
    pub root: String,
    /// Name of the strategy that was used
    pub strategy: String,
    /// Wall-clock time of the run in milliseconds
    pub elapsed_ms: u128,
    /// Number of pages discovered
    pub total: usize,
    /// The discovered pages, sorted
    pub pages: Vec<String>,
}

impl CrawlReport {
    pub fn new(root: &str, strategy: &str, elapsed_ms: u128, pages: Vec<String>) -> Self {
        Self {
            root: root.to_string(),
            strategy: strategy.to_string(),
            elapsed_ms,
            total: pages.len(),
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_to_list_sorts() {
        let set: HashSet<String> = ["https://a.com/z", "https://a.com/b", "https://a.com/a"]
            .into_iter()
            .map(String::from)
            .collect();

        let list = map_to_list(set.clone());

        assert_eq!(list, vec!["https://a.com/a", "https://a.com/b", "https://a.com/z"]);
        assert_eq!(list.len(), set.len());
        assert!(list.iter().all(|link| set.contains(link)));
    }

    #[test]
    fn test_map_to_list_empty() {
        assert!(map_to_list(HashSet::new()).is_empty());
    }

    #[test]
    fn test_report_json_shape() {
        let report = CrawlReport::new(
            "https://a.com/",
            "Recursive",
            12,
            vec!["https://a.com/x".to_string()],
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["strategy"], "Recursive");
        assert_eq!(json["pages"][0], "https://a.com/x");
    }
}
