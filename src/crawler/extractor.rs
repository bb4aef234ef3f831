//! Record extraction from listing pages
//!
//! This module turns fetched HTML into hotel records plus a continuation
//! signal:
//! - Listing cards are found with a fallback list of selectors, tried in
//!   order until one matches (markup varies between site revisions)
//! - Within each card, field sub-selectors pull the name, city and rating
//! - A next-page selector decides how the source continues: a usable link
//!   target, template pagination, or exhaustion
//!
//! Extraction never fails: a page where nothing matches yields an empty
//! record list and a warning, and the crawl loop decides what that means.

use crate::config::ExtractorConfig;
use crate::crawler::fetcher::Page;
use crate::model::{Record, Source};
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// What the crawl loop should do after a page has been extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Build the next page URL from the source's `{page}` template
    NextPage,
    /// Follow this absolute target to reach the next page
    ClickAndWait { target: String },
    /// This source has no further pages
    NextSource,
}

/// Records and continuation signal extracted from one page
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub continuation: Continuation,
}

/// Extracts records from a fetched page
///
/// Implementations are infallible on missing content: pages with no
/// recognizable listings produce an empty record list, never an error.
pub trait RecordExtractor: Send + Sync {
    fn extract(&self, source: &Source, page: &Page) -> Extraction;
}

/// `RecordExtractor` driven by configured CSS selectors
pub struct SelectorExtractor {
    cards: Vec<Selector>,
    name: Selector,
    city: Option<Selector>,
    rating: Option<Selector>,
    next_page: Option<Selector>,
}

impl SelectorExtractor {
    /// Builds the extractor from validated configuration
    ///
    /// Selectors are parsed once here; a parse failure is a configuration
    /// error, so extraction itself never deals with broken selectors.
    pub fn new(config: &ExtractorConfig) -> Result<Self, ConfigError> {
        let cards = config
            .card_selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            cards,
            name: parse_selector(&config.name_selector)?,
            city: config.city_selector.as_deref().map(parse_selector).transpose()?,
            rating: config
                .rating_selector
                .as_deref()
                .map(parse_selector)
                .transpose()?,
            next_page: config
                .next_page_selector
                .as_deref()
                .map(parse_selector)
                .transpose()?,
        })
    }

    /// Returns the cards matched by the first selector that hits
    fn select_cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        for selector in &self.cards {
            let cards: Vec<_> = document.select(selector).collect();
            if !cards.is_empty() {
                return cards;
            }
        }
        Vec::new()
    }

    fn extract_records(&self, source: &Source, page: &Page, document: &Html) -> Vec<Record> {
        let cards = self.select_cards(document);
        if cards.is_empty() {
            tracing::warn!(
                source = source.label(),
                url = %page.url,
                "no listing cards matched any configured selector"
            );
            return Vec::new();
        }

        let mut records = Vec::new();
        for card in cards {
            let name = match element_text(&card, &self.name) {
                Some(name) => name,
                None => continue, // card without a readable name
            };

            let city = self
                .city
                .as_ref()
                .and_then(|selector| element_text(&card, selector))
                .or_else(|| source.city_name().map(String::from));
            let rating = self
                .rating
                .as_ref()
                .and_then(|selector| element_text(&card, selector));

            if let Some(record) = Record::new(&name, city.as_deref(), rating.as_deref()) {
                records.push(record);
            }
        }
        records
    }

    fn find_continuation(&self, page: &Page, document: &Html) -> Continuation {
        let selector = match &self.next_page {
            // No indicator configured: paginate through the URL template
            None => return Continuation::NextPage,
            Some(selector) => selector,
        };

        let element = match document.select(selector).next() {
            // The site stopped offering a next page
            None => return Continuation::NextSource,
            Some(element) => element,
        };

        match element
            .value()
            .attr("href")
            .and_then(|href| resolve_next_target(href, &page.url))
        {
            Some(target) => Continuation::ClickAndWait { target },
            // Script-driven button: fall back to template pagination
            None => Continuation::NextPage,
        }
    }
}

impl RecordExtractor for SelectorExtractor {
    fn extract(&self, source: &Source, page: &Page) -> Extraction {
        let document = Html::parse_document(&page.body);
        let records = self.extract_records(source, page, &document);
        let continuation = self.find_continuation(page, &document);
        Extraction {
            records,
            continuation,
        }
    }
}

/// Parses a CSS selector into its compiled form
fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {}", selector, e)))
}

/// Extracts the trimmed text of the first match inside a card
fn element_text(card: &ElementRef, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Resolves a next-page href to an absolute URL and validates it
///
/// Returns None if the href cannot be followed directly:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_next_target(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
