//! Crawler module for web page fetching and indexing
//!
//! This module contains the core crawl logic:
//! - HTTP fetching with a bounded per-request timeout
//! - Title, text, and link extraction from HTML
//! - The breadth-first engine that drives both and feeds the index

mod engine;
mod extractor;
mod fetcher;

pub use engine::{CrawlEngine, CrawlReport};
pub use extractor::{extract_page, ExtractedPage, NO_TITLE};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
