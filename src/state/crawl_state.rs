//! Accumulated crawl results
//!
//! One `CrawlState` exists per run. It is created before the first source,
//! owned by the coordinator for the whole run, handed to the sink at the
//! end, and then discarded. `insert` is the single deduplication point, so
//! whether duplicates appear within one page, across pages, or across
//! sources makes no difference to the final set.

use crate::model::Record;
use crate::state::SourceReport;
use std::collections::HashSet;

/// Deduplicated records plus per-source reports for one run
#[derive(Debug, Default)]
pub struct CrawlState {
    seen: HashSet<Record>,
    records: Vec<Record>,
    reports: Vec<SourceReport>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record unless an equal one was already accumulated
    ///
    /// Returns true when the record was new. Insertion order of first
    /// occurrences is preserved for the export.
    pub fn insert(&mut self, record: Record) -> bool {
        if self.seen.insert(record.clone()) {
            self.records.push(record);
            true
        } else {
            false
        }
    }

    /// Unique records in first-seen order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of unique records accumulated so far
    pub fn unique_count(&self) -> usize {
        self.records.len()
    }

    pub fn push_report(&mut self, report: SourceReport) {
        self.reports.push(report);
    }

    pub fn reports(&self) -> &[SourceReport] {
        &self.reports
    }

    /// Raw records found across all sources, duplicates included
    pub fn total_found(&self) -> usize {
        self.reports.iter().map(|r| r.records_found).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, city: &str) -> Record {
        Record::new(name, Some(city), None).unwrap()
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut state = CrawlState::new();
        assert!(state.insert(record("Grand Hotel", "Tehran")));
        assert!(!state.insert(record("Grand Hotel", "Tehran")));
        assert!(!state.insert(record("Grand Hotel", "Tehran")));
        assert_eq!(state.unique_count(), 1);
    }

    #[test]
    fn test_insert_distinguishes_fields() {
        let mut state = CrawlState::new();
        assert!(state.insert(record("Grand Hotel", "Tehran")));
        assert!(state.insert(record("Grand Hotel", "Shiraz")));
        assert!(state.insert(Record::named("Grand Hotel").unwrap()));
        assert_eq!(state.unique_count(), 3);
    }

    #[test]
    fn test_final_set_ignores_arrival_order() {
        let a = record("Grand Hotel", "Tehran");
        let b = record("Budget Inn", "Tehran");
        let c = record("Coastal Resort", "Bandar Abbas");

        let mut forward = CrawlState::new();
        for r in [&a, &b, &a, &c, &b] {
            forward.insert(r.clone());
        }

        let mut reversed = CrawlState::new();
        for r in [&b, &c, &a, &b, &a] {
            reversed.insert(r.clone());
        }

        assert_eq!(forward.unique_count(), 3);
        assert_eq!(reversed.unique_count(), 3);

        let forward_set: HashSet<_> = forward.records().iter().cloned().collect();
        let reversed_set: HashSet<_> = reversed.records().iter().cloned().collect();
        assert_eq!(forward_set, reversed_set);
    }

    #[test]
    fn test_first_seen_order_is_preserved() {
        let mut state = CrawlState::new();
        state.insert(record("Budget Inn", "Tehran"));
        state.insert(record("Grand Hotel", "Tehran"));
        state.insert(record("Budget Inn", "Tehran"));

        let names: Vec<_> = state.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Budget Inn", "Grand Hotel"]);
    }

    #[test]
    fn test_total_found_sums_raw_counts() {
        use crate::state::SourceOutcome;

        let mut state = CrawlState::new();
        state.push_report(SourceReport {
            label: "Tehran".to_string(),
            pages_fetched: 2,
            records_found: 5,
            records_new: 4,
            outcome: SourceOutcome::Exhausted,
        });
        state.push_report(SourceReport {
            label: "Shiraz".to_string(),
            pages_fetched: 1,
            records_found: 3,
            records_new: 1,
            outcome: SourceOutcome::Exhausted,
        });

        assert_eq!(state.total_found(), 8);
        assert_eq!(state.reports().len(), 2);
    }
}
