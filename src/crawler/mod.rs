//! Crawler module for walking listing sources
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` trait
//! - Selector-driven record extraction and continuation detection
//! - The sequential crawl loop with per-source failure isolation

mod coordinator;
mod extractor;
mod fetcher;

pub use coordinator::{run_crawl, Coordinator};
pub use extractor::{Continuation, Extraction, RecordExtractor, SelectorExtractor};
pub use fetcher::{build_http_client, FetchError, HttpFetcher, Page, PageFetcher};
