//! Page fetching
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests to fetch listing pages
//! - Following continuation links relative to the current page
//! - Error classification (timeout, connection, status)
//!
//! The crawl loop talks to the [`PageFetcher`] trait, not to reqwest
//! directly, so a session-holding implementation (a headless browser, a
//! recorded fixture set) can slot in without touching the loop.

use crate::config::FetchConfig;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A fetched page: the final URL after redirects plus the raw body
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects, used to resolve relative links
    pub url: Url,
    /// Raw response body
    pub body: String,
}

impl Page {
    /// Resolves a link target against this page's URL
    pub fn resolve(&self, target: &str) -> Result<Url, FetchError> {
        self.url.join(target).map_err(|e| FetchError::InvalidTarget {
            target: target.to_string(),
            source: e,
        })
    }
}

/// Errors from fetching a single page
///
/// These are page-scoped: the crawl loop converts them into a failure of the
/// current source and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Invalid link target '{target}': {source}")]
    InvalidTarget {
        target: String,
        source: url::ParseError,
    },
}

/// Fetches pages on behalf of the crawl loop
///
/// One fetch is in flight at a time; implementations do not need internal
/// request queueing. `shutdown` is called exactly once on every exit path of
/// a run so implementations holding a session resource release it there.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page at an absolute URL
    async fn fetch(&self, url: &str) -> Result<Page, FetchError>;

    /// Follows a continuation target from the current page
    ///
    /// The default resolves `target` against the page URL and fetches the
    /// result. A browser-backed implementation would click the target and
    /// wait for navigation instead.
    async fn follow(&self, page: &Page, target: &str) -> Result<Page, FetchError> {
        let resolved = page.resolve(target)?;
        self.fetch(resolved.as_str()).await
    }

    /// Releases any session resource held by the fetcher
    async fn shutdown(&self);
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use hotelsweep::config::FetchConfig;
/// use hotelsweep::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` over a plain reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds the fetcher and its HTTP client
    ///
    /// A build failure here is fatal for the run: no session exists yet, so
    /// the caller reports it and exits before any source is crawled.
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        let final_url = response.url().clone();

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_error(url, e))?;

        Ok(Page {
            url: final_url,
            body,
        })
    }

    async fn shutdown(&self) {
        // reqwest clients release their connection pool on drop
        tracing::debug!("http session closed");
    }
}

/// Classifies a reqwest error into a fetch error
fn classify_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: e,
        }
    }
}
