//! State accumulated over a crawl run
//!
//! # Components
//!
//! - `CrawlState`: The run's deduplicated record set and per-source reports
//! - `SourceReport` / `SourceOutcome`: How each configured source ended

mod crawl_state;
mod source_report;

// Re-export main types
pub use crawl_state::CrawlState;
pub use source_report::{SourceOutcome, SourceReport};
