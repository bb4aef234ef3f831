//! Progress line formatting
//!
//! The progress log is consumed by shell tooling that greps for these exact
//! shapes, so the wording is part of the external interface and changes
//! here are breaking.

use crate::state::SourceReport;

/// Line appended after a source completes
///
/// The count is the raw number of records found for the source, before
/// deduplication against other sources.
pub fn scraped_line(records_found: usize, label: &str) -> String {
    format!("Scraped {} hotels from {}", records_found, label)
}

/// Line appended after a source fails
pub fn failure_line(label: &str, reason: &str) -> String {
    format!("Failed to scrape {}: {}", label, reason)
}

/// Progress line for a finished source, failure note included
///
/// Skipped sources produce no line: the log records what the run did, and a
/// skipped source did nothing.
pub fn line_for(report: &SourceReport) -> Option<String> {
    use crate::state::SourceOutcome;

    match &report.outcome {
        SourceOutcome::Exhausted => Some(scraped_line(report.records_found, &report.label)),
        SourceOutcome::Failed(reason) => Some(failure_line(&report.label, reason)),
        SourceOutcome::Skipped => None,
    }
}
