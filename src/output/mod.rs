//! Output module for hotelsweep
//!
//! This module persists and presents crawl results:
//!
//! - `ResultSink` / `FileSink`: CSV export plus append-only progress log
//! - `ExportColumns`: the per-run column layout of the export
//! - Progress line formatting (`Scraped N hotels from X`)
//! - The stdout run report

mod file_sink;
mod progress;
mod report;
mod traits;

// Re-export trait types
pub use traits::{ExportColumns, PersistError, PersistResult, ResultSink};

// Re-export implementations
pub use file_sink::FileSink;
pub use progress::{failure_line, line_for, scraped_line};
pub use report::{print_report, RunSummary};
