// src/crawl/pipeline.rs
// =============================================================================
// The fetch -> parse -> extract -> collect pipeline.
//
// Each stage runs as its own tokio task and talks to the next stage through
// an unbounded channel:
//
//   fetch(urls)  --Response-->  parse  --Document-->  extract  --href-->  collect
//
// While one page is still downloading, an earlier one can already be parsed
// and scanned for links. The strategies never see any of this: they call
// discover() (or collect() on a hand-built chain) and get a plain HashSet.
//
// Failures are soft. A page that cannot be fetched simply never enters the
// stream, so it contributes zero links without failing the round.
//
// Rust concepts:
// - tokio::spawn: Start a task that runs concurrently with the caller
// - mpsc channels: When every sender is dropped, recv() returns None, which
//   is how "end of stream" propagates down the pipeline
// - Arc<dyn Trait>: Share one fetcher between many tasks
// =============================================================================

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use url::Url;

use super::document::Document;
use super::extract::extract_links;
use super::fetch::{Fetcher, Response};

// The output end of a pipeline stage
pub type Stage<T> = UnboundedReceiver<T>;

// Downloads every URL in order and streams the successful responses
pub fn fetch(fetcher: Arc<dyn Fetcher>, urls: Vec<String>) -> Stage<Response> {
    let (tx, rx) = unbounded_channel();
    tokio::spawn(async move {
        for url in urls {
            match fetcher.fetch(&url).await {
                Ok(response) => {
                    if tx.send(response).is_err() {
                        // Downstream hung up, nobody wants the rest
                        break;
                    }
                }
                Err(e) => tracing::debug!(url = %url, error = %e, "skipping page"),
            }
        }
    });
    rx
}

// Parses each response body into a Document
pub fn parse(mut responses: Stage<Response>) -> Stage<Document> {
    let (tx, rx) = unbounded_channel();
    tokio::spawn(async move {
        while let Some(response) = responses.recv().await {
            tracing::trace!(url = %response.url, status = response.status, "parsing");
            let document = Document::parse(&response.body);
            if tx.send(document).is_err() {
                break;
            }
        }
    });
    rx
}

// Emits every same-host link of every document as a separate item
pub fn extract(mut documents: Stage<Document>, reference: Url) -> Stage<String> {
    let (tx, rx) = unbounded_channel();
    tokio::spawn(async move {
        while let Some(document) = documents.recv().await {
            for link in extract_links(&document, &reference) {
                if tx.send(link).is_err() {
                    return;
                }
            }
        }
    });
    rx
}

// Drains a stream of links into a set
//
// This is where the asynchronous stages are joined back: it returns only
// once every upstream stage has finished.
pub async fn collect(mut links: Stage<String>) -> HashSet<String> {
    let mut result = HashSet::new();
    while let Some(link) = links.recv().await {
        result.insert(link);
    }
    result
}

// Runs the whole pipeline for one page
pub async fn discover(fetcher: Arc<dyn Fetcher>, url: &str, reference: &Url) -> HashSet<String> {
    collect(extract(
        parse(fetch(fetcher, vec![url.to_string()])),
        reference.clone(),
    ))
    .await
}
