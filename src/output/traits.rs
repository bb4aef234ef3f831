//! Result sink traits and types
//!
//! This module defines the trait interface for persisting crawl results and
//! the column layout of the export.

use crate::config::Config;
use crate::model::Record;
use thiserror::Error;

/// Errors that can occur while persisting results
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to write export: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for persistence operations
pub type PersistResult<T> = Result<T, PersistError>;

/// Columns present in the export
///
/// Decided once per run from the configuration, before any page is fetched,
/// so every row has the same shape regardless of which source produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportColumns {
    pub city: bool,
    pub rating: bool,
}

impl ExportColumns {
    /// Derives the run's column set from the configuration
    ///
    /// The city column appears when any source is a city page or a city
    /// selector is configured; the rating column appears when a rating
    /// selector is configured.
    pub fn from_config(config: &Config) -> Self {
        Self {
            city: config.has_city_sources() || config.extractor.city_selector.is_some(),
            rating: config.extractor.rating_selector.is_some(),
        }
    }

    /// Header row for the export
    pub fn header(&self) -> Vec<&'static str> {
        let mut header = vec!["Hotel Name"];
        if self.city {
            header.push("City");
        }
        if self.rating {
            header.push("Rating");
        }
        header
    }

    /// One export row; absent optional fields render as empty cells
    pub fn row(&self, record: &Record) -> Vec<String> {
        let mut row = vec![record.name.clone()];
        if self.city {
            row.push(record.city.clone().unwrap_or_default());
        }
        if self.rating {
            row.push(record.rating.clone().unwrap_or_default());
        }
        row
    }
}

/// Persists accumulated crawl results
///
/// `flush` writes the complete export once at the end of a run; its failure
/// is terminal for the run, but the accumulated state stays with the caller
/// so a retry rewrites the same content. `append_progress` records one line
/// after each source and is advisory: the crawl loop logs its failure and
/// moves on.
pub trait ResultSink: Send + Sync {
    /// Writes the full record set as the export
    fn flush(&self, records: &[Record], columns: ExportColumns) -> PersistResult<()>;

    /// Appends one line to the progress log
    fn append_progress(&self, line: &str) -> PersistResult<()>;
}
