//! Run report printed after a crawl
//!
//! This module summarizes a finished run for the terminal: how each source
//! ended, how many records were found versus kept, and how long the run
//! took.

use crate::state::CrawlState;
use chrono::{DateTime, Local};

/// Aggregated counts for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sources_total: usize,
    pub sources_completed: usize,
    pub sources_failed: usize,
    pub sources_skipped: usize,
    pub records_found: usize,
    pub records_unique: usize,
}

impl RunSummary {
    /// Derives the summary from the run's accumulated state
    pub fn from_state(state: &CrawlState) -> Self {
        let reports = state.reports();
        Self {
            sources_total: reports.len(),
            sources_completed: reports.iter().filter(|r| r.outcome.is_exhausted()).count(),
            sources_failed: reports.iter().filter(|r| r.outcome.is_failed()).count(),
            sources_skipped: reports.iter().filter(|r| r.outcome.is_skipped()).count(),
            records_found: state.total_found(),
            records_unique: state.unique_count(),
        }
    }

    /// Records dropped by deduplication
    pub fn duplicates_dropped(&self) -> usize {
        self.records_found.saturating_sub(self.records_unique)
    }
}

/// Prints the run report to stdout in a formatted manner
///
/// # Arguments
///
/// * `state` - The finished run's state
/// * `started_at` - When the run started
/// * `finished_at` - When the run finished
pub fn print_report(state: &CrawlState, started_at: DateTime<Local>, finished_at: DateTime<Local>) {
    let summary = RunSummary::from_state(state);

    println!("=== Crawl Report ===\n");

    println!("Started:  {}", started_at.format("%Y-%m-%d %H:%M:%S"));
    println!("Finished: {}", finished_at.format("%Y-%m-%d %H:%M:%S"));
    let duration = finished_at.signed_duration_since(started_at);
    println!("Duration: {}s", duration.num_seconds());
    println!();

    println!("Sources:");
    for report in state.reports() {
        println!(
            "  {} - {} ({} pages, {} found, {} new)",
            report.label,
            report.outcome,
            report.pages_fetched,
            report.records_found,
            report.records_new
        );
    }
    println!();

    println!(
        "Completed: {} / {}",
        summary.sources_completed, summary.sources_total
    );
    if summary.sources_failed > 0 {
        println!("Failed: {}", summary.sources_failed);
    }
    if summary.sources_skipped > 0 {
        println!("Skipped: {}", summary.sources_skipped);
    }
    println!();

    println!(
        "Hotels: {} found, {} unique ({} duplicates dropped)",
        summary.records_found,
        summary.records_unique,
        summary.duplicates_dropped()
    );
}
