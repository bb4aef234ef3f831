use crate::model::Source;
use serde::Deserialize;

/// User agent sent by default, matching a common desktop browser
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for hotelsweep
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    pub extractor: ExtractorConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub source: Vec<Source>,
}

impl Config {
    /// Whether any configured source is a city page
    pub fn has_city_sources(&self) -> bool {
        self.source.iter().any(|s| matches!(s, Source::City { .. }))
    }

    /// Whether any configured source is a search term
    pub fn has_search_sources(&self) -> bool {
        self.source
            .iter()
            .any(|s| matches!(s, Source::SearchTerm { .. }))
    }
}

/// Crawl loop behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Pause between page fetches (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Hard cap on pages fetched per source
    #[serde(rename = "max-pages-per-source")]
    pub max_pages_per_source: u32,

    /// Consecutive zero-record pages before a source is considered exhausted
    #[serde(rename = "stop-after-empty-pages")]
    pub stop_after_empty_pages: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 500,
            max_pages_per_source: 50,
            stop_after_empty_pages: 1,
        }
    }
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Record extraction configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorConfig {
    /// Listing card selectors, tried in order until one matches
    #[serde(rename = "card-selectors")]
    pub card_selectors: Vec<String>,

    /// Selector for the hotel name within a card
    #[serde(rename = "name-selector")]
    pub name_selector: String,

    /// Selector for the city within a card
    #[serde(rename = "city-selector")]
    pub city_selector: Option<String>,

    /// Selector for the rating within a card
    #[serde(rename = "rating-selector")]
    pub rating_selector: Option<String>,

    /// Selector for the next-page link or button
    #[serde(rename = "next-page-selector")]
    pub next_page_selector: Option<String>,

    /// Search URL template with a `{term}` and optional `{page}` placeholder
    #[serde(rename = "search-url")]
    pub search_url: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV export file
    #[serde(rename = "export-path")]
    pub export_path: String,

    /// Path to the append-only progress log
    #[serde(rename = "progress-path")]
    pub progress_path: String,
}
