//! Domain model for crawled hotel listings
//!
//! # Components
//!
//! - `Record`: A single extracted hotel listing (name plus optional city and rating)
//! - `Source`: A place to crawl listings from (a city page or a search term)

mod record;
mod source;

// Re-export main types
pub use record::Record;
pub use source::{Source, PAGE_PLACEHOLDER, TERM_PLACEHOLDER};
