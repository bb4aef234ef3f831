//! Hotelsweep: a multi-source hotel listing crawler
//!
//! This crate implements a sequential crawl loop that walks a list of city
//! pages and search results, extracts hotel records with CSS selectors,
//! deduplicates them across sources, and exports the result as CSV alongside
//! an append-only progress log.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for hotelsweep operations
///
/// Only errors that end a run reach this level. Per-page and per-source
/// failures are absorbed by the crawl loop and surface in the run report
/// instead.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to initialize fetcher: {0}")]
    ResourceInit(reqwest::Error),

    #[error("Failed to persist results: {0}")]
    Persist(#[from] output::PersistError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for hotelsweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Continuation, Extraction, FetchError, Page, PageFetcher, RecordExtractor};
pub use model::{Record, Source};
pub use state::{CrawlState, SourceOutcome, SourceReport};
