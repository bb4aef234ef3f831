//! Crawl sources
//!
//! A source is one entry in the configured crawl order: either a city whose
//! listing page URL is known directly, or a search term expanded through the
//! configured search URL template. Sources know how to build the URL for a
//! given page number; everything past page 1 relies on a `{page}`
//! placeholder in the URL or template.

use serde::Deserialize;

/// Placeholder replaced with the 1-based page number
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Placeholder replaced with the form-encoded search term
pub const TERM_PLACEHOLDER: &str = "{term}";

/// A place to crawl hotel listings from
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Source {
    /// A city page with a known listing URL
    City { name: String, url: String },
    /// A search term expanded through the search URL template
    SearchTerm { term: String },
}

impl Source {
    /// Display name used in progress lines and the run report
    pub fn label(&self) -> &str {
        match self {
            Source::City { name, .. } => name,
            Source::SearchTerm { term } => term,
        }
    }

    /// City name to fall back to for records extracted without one
    pub fn city_name(&self) -> Option<&str> {
        match self {
            Source::City { name, .. } => Some(name),
            Source::SearchTerm { .. } => None,
        }
    }

    /// Build the URL for a page of this source
    ///
    /// Page numbering starts at 1. Returns `None` when the page cannot be
    /// addressed: pages past the first need a `{page}` placeholder in the
    /// city URL or search template.
    ///
    /// # Arguments
    ///
    /// * `page` - 1-based page number
    /// * `search_url` - Search URL template, required for search-term sources
    pub fn page_url(&self, page: u32, search_url: Option<&str>) -> Option<String> {
        let template = match self {
            Source::City { url, .. } => url.clone(),
            Source::SearchTerm { term } => {
                let encoded: String = url::form_urlencoded::byte_serialize(term.as_bytes()).collect();
                search_url?.replace(TERM_PLACEHOLDER, &encoded)
            }
        };

        if template.contains(PAGE_PLACEHOLDER) {
            Some(template.replace(PAGE_PLACEHOLDER, &page.to_string()))
        } else if page == 1 {
            Some(template)
        } else {
            None
        }
    }
}
