//! Per-source outcomes for the run report
//!
//! Every source the run touches (or skips) leaves exactly one report behind,
//! so the final summary can account for the whole configured source list.

use std::fmt;

/// How processing of a single source ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    // ===== Completion =====
    /// All reachable pages were walked; nothing further is available
    Exhausted,

    // ===== Failure =====
    /// A page fetch failed; records from completed pages were kept
    Failed(String),

    // ===== Cancellation =====
    /// The run was cancelled before this source started
    Skipped,
}

impl SourceOutcome {
    /// Returns true when the source ran to completion
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Returns true when the source ended with a fetch failure
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns true when the source never started
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

impl fmt::Display for SourceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => write!(f, "exhausted"),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// Counters for one source of the run
///
/// `records_found` counts raw extractions before deduplication; it is the
/// number reported in progress lines. `records_new` counts what this source
/// actually added to the deduplicated set.
#[derive(Debug, Clone)]
pub struct SourceReport {
    /// Display name of the source
    pub label: String,
    /// Pages fetched for this source
    pub pages_fetched: u32,
    /// Records extracted, duplicates included
    pub records_found: usize,
    /// Records that were new to the run
    pub records_new: usize,
    /// How the source ended
    pub outcome: SourceOutcome,
}

impl SourceReport {
    /// Report for a source the run never reached
    pub fn skipped(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pages_fetched: 0,
            records_found: 0,
            records_new: 0,
            outcome: SourceOutcome::Skipped,
        }
    }
}
