//! Crawl engine - breadth-first traversal of one site
//!
//! The engine owns the frontier queue and visited set, drives the fetcher and
//! extractor, and writes every successfully fetched page into the document
//! index. Traversal is FIFO, so pages closer to the starting URL are indexed
//! first, and it is confined to the starting URL's network location.

use crate::config::CrawlerConfig;
use crate::crawler::extractor::{extract_page, NO_TITLE};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::index::SearchIndex;
use crate::url::{network_location, resolve_href, same_scope};
use crate::{QuarryError, UrlError};
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// Summary of one completed crawl run
#[derive(Debug, Default, Clone)]
pub struct CrawlReport {
    /// Pages fetched, extracted, and written to the index
    pub pages_indexed: u64,

    /// Pages skipped over a fetch, extract, or index-write failure
    pub pages_failed: u64,

    /// Hrefs dropped as malformed or non-fetchable
    pub links_discarded: u64,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl std::fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pages indexed, {} failed, {} links discarded in {:.2}s",
            self.pages_indexed,
            self.pages_failed,
            self.links_discarded,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Breadth-first crawl engine over one network location
pub struct CrawlEngine<'a> {
    client: Client,
    index: &'a mut SearchIndex,
    frontier: VecDeque<Url>,
    visited: HashSet<String>,
    enqueued: HashSet<String>,
    report: CrawlReport,
}

impl<'a> CrawlEngine<'a> {
    /// Creates an engine writing into the given index
    pub fn new(config: &CrawlerConfig, index: &'a mut SearchIndex) -> Result<Self, QuarryError> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.fetch_timeout_secs),
        )?;

        Ok(Self {
            client,
            index,
            frontier: VecDeque::new(),
            visited: HashSet::new(),
            enqueued: HashSet::new(),
            report: CrawlReport::default(),
        })
    }

    /// Crawls every reachable in-scope page from the starting URL
    ///
    /// Returns once the frontier is exhausted; there is no depth or page
    /// count limit. Single-page failures of any kind are logged and skipped,
    /// never propagated - the only errors this method returns are a
    /// malformed or host-less starting URL.
    pub async fn crawl(&mut self, start_url: &str) -> Result<CrawlReport, QuarryError> {
        let start = Url::parse(start_url)?;
        let scope = network_location(&start).ok_or(UrlError::MissingHost)?;

        tracing::info!(start = %start, scope = %scope, "starting crawl");

        self.enqueued.insert(start.to_string());
        self.frontier.push_back(start.clone());

        let began = std::time::Instant::now();
        let mut processed: u64 = 0;

        while let Some(url) = self.frontier.pop_front() {
            // Insertion-time dedup should make this impossible; kept as a
            // guard in case the frontier is ever fed concurrently.
            if self.visited.contains(url.as_str()) {
                continue;
            }

            self.process_page(&url, &start).await;

            processed += 1;
            if processed % 10 == 0 {
                tracing::info!(
                    processed,
                    frontier = self.frontier.len(),
                    indexed = self.report.pages_indexed,
                    "crawl progress"
                );
            }
        }

        self.report.elapsed = began.elapsed();
        tracing::info!("crawl complete: {}", self.report);

        Ok(self.report.clone())
    }

    /// Fetches, extracts, and indexes a single page
    async fn process_page(&mut self, url: &Url, start: &Url) {
        tracing::debug!(url = %url, "fetching");

        match fetch_page(&self.client, url).await {
            FetchOutcome::Success { status_code, body } => {
                let page = extract_page(&body);
                let title = page.title.as_deref().unwrap_or(NO_TITLE);

                if let Err(e) = self.index.add_document(url.as_str(), title, &page.content) {
                    tracing::error!(url = %url, error = %e, "index write failed, skipping page");
                    self.report.pages_failed += 1;
                    return;
                }

                self.visited.insert(url.to_string());
                self.report.pages_indexed += 1;
                tracing::debug!(url = %url, status_code, links = page.links.len(), "indexed");

                self.enqueue_links(url, &page.links, start);
            }

            FetchOutcome::HttpError { status_code } => {
                tracing::warn!(url = %url, status_code, "skipping page: HTTP error");
                self.report.pages_failed += 1;
            }

            FetchOutcome::Timeout => {
                tracing::warn!(url = %url, "skipping page: fetch timed out");
                self.report.pages_failed += 1;
            }

            FetchOutcome::NetworkError { error } => {
                tracing::warn!(url = %url, error = %error, "skipping page: network error");
                self.report.pages_failed += 1;
            }
        }
    }

    /// Resolves discovered hrefs and appends in-scope new URLs to the frontier
    ///
    /// A URL is enqueued at most once per run, which also makes a failed
    /// fetch terminal: the URL stays in the dedup set and is never retried.
    fn enqueue_links(&mut self, base: &Url, hrefs: &[String], start: &Url) {
        for href in hrefs {
            let resolved = match resolve_href(base, href) {
                Some(url) => url,
                None => {
                    self.report.links_discarded += 1;
                    continue;
                }
            };

            if !same_scope(&resolved, start) {
                tracing::trace!(url = %resolved, "out of scope");
                continue;
            }

            let key = resolved.to_string();
            if self.visited.contains(&key) || self.enqueued.contains(&key) {
                continue;
            }

            self.enqueued.insert(key);
            self.frontier.push_back(resolved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrawlerConfig;

    fn test_engine(index: &mut SearchIndex) -> CrawlEngine<'_> {
        CrawlEngine::new(&CrawlerConfig::default(), index).unwrap()
    }

    #[test]
    fn test_enqueue_keeps_in_scope_links() {
        let mut index = SearchIndex::open_in_memory().unwrap();
        let mut engine = test_engine(&mut index);
        let start = Url::parse("https://site.test/").unwrap();
        let base = Url::parse("https://site.test/index.html").unwrap();

        engine.enqueue_links(
            &base,
            &["/a".to_string(), "https://site.test/b".to_string()],
            &start,
        );

        assert_eq!(engine.frontier.len(), 2);
    }

    #[test]
    fn test_enqueue_drops_cross_domain_links() {
        let mut index = SearchIndex::open_in_memory().unwrap();
        let mut engine = test_engine(&mut index);
        let start = Url::parse("https://a.example/").unwrap();

        engine.enqueue_links(&start, &["https://b.example/page".to_string()], &start);

        assert!(engine.frontier.is_empty());
    }

    #[test]
    fn test_enqueue_deduplicates() {
        let mut index = SearchIndex::open_in_memory().unwrap();
        let mut engine = test_engine(&mut index);
        let start = Url::parse("https://site.test/").unwrap();

        engine.enqueue_links(&start, &["/page".to_string(), "/page".to_string()], &start);
        engine.enqueue_links(&start, &["/page".to_string()], &start);

        assert_eq!(engine.frontier.len(), 1);
    }

    #[test]
    fn test_enqueue_skips_visited() {
        let mut index = SearchIndex::open_in_memory().unwrap();
        let mut engine = test_engine(&mut index);
        let start = Url::parse("https://site.test/").unwrap();

        engine.visited.insert("https://site.test/seen".to_string());
        engine.enqueue_links(&start, &["/seen".to_string()], &start);

        assert!(engine.frontier.is_empty());
    }

    #[test]
    fn test_malformed_links_counted_as_discarded() {
        let mut index = SearchIndex::open_in_memory().unwrap();
        let mut engine = test_engine(&mut index);
        let start = Url::parse("https://site.test/").unwrap();

        engine.enqueue_links(
            &start,
            &["mailto:x@site.test".to_string(), "#frag".to_string()],
            &start,
        );

        assert!(engine.frontier.is_empty());
        assert_eq!(engine.report.links_discarded, 2);
    }
}
