//! File-backed result sink
//!
//! Writes the CSV export and the append-only progress log. The export is
//! rewritten in full on every flush, so retrying a failed flush can never
//! duplicate rows; the progress log is only ever appended to, so earlier
//! runs stay visible.

use crate::model::Record;
use crate::output::traits::{ExportColumns, PersistResult, ResultSink};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// `ResultSink` over a CSV export file and a plain-text progress log
pub struct FileSink {
    export_path: PathBuf,
    progress_path: PathBuf,
}

impl FileSink {
    /// Creates the sink; no files are touched until the first write
    pub fn new(export_path: impl Into<PathBuf>, progress_path: impl Into<PathBuf>) -> Self {
        Self {
            export_path: export_path.into(),
            progress_path: progress_path.into(),
        }
    }
}

impl ResultSink for FileSink {
    fn flush(&self, records: &[Record], columns: ExportColumns) -> PersistResult<()> {
        let mut writer = csv::Writer::from_path(&self.export_path)?;

        writer.write_record(columns.header())?;
        for record in records {
            writer.write_record(columns.row(record))?;
        }
        writer.flush()?;

        tracing::info!(
            records = records.len(),
            path = %self.export_path.display(),
            "export written"
        );
        Ok(())
    }

    fn append_progress(&self, line: &str) -> PersistResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.progress_path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(name: &str, city: &str, rating: &str) -> Record {
        Record::new(name, Some(city), Some(rating)).unwrap()
    }

    #[test]
    fn test_flush_writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let export = dir.path().join("hotels.csv");
        let sink = FileSink::new(&export, dir.path().join("progress.log"));

        let records = vec![
            record("Grand Hotel", "Tehran", "4.5"),
            record("Budget Inn", "Tehran", "3.1"),
        ];
        let columns = ExportColumns {
            city: true,
            rating: true,
        };
        sink.flush(&records, columns).unwrap();

        let content = std::fs::read_to_string(&export).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "Hotel Name,City,Rating");
        assert_eq!(lines[1], "Grand Hotel,Tehran,4.5");
        assert_eq!(lines[2], "Budget Inn,Tehran,3.1");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_flush_overwrites_previous_export() {
        let dir = tempdir().unwrap();
        let export = dir.path().join("hotels.csv");
        let sink = FileSink::new(&export, dir.path().join("progress.log"));
        let columns = ExportColumns {
            city: false,
            rating: false,
        };

        sink.flush(&[record("Grand Hotel", "x", "x")], columns)
            .unwrap();
        sink.flush(&[record("Budget Inn", "x", "x")], columns)
            .unwrap();

        let content = std::fs::read_to_string(&export).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec!["Hotel Name", "Budget Inn"]);
    }

    #[test]
    fn test_flush_quotes_fields_with_commas() {
        let dir = tempdir().unwrap();
        let export = dir.path().join("hotels.csv");
        let sink = FileSink::new(&export, dir.path().join("progress.log"));

        let records = vec![Record::named("Grand Hotel, Downtown").unwrap()];
        let columns = ExportColumns {
            city: false,
            rating: false,
        };
        sink.flush(&records, columns).unwrap();

        let content = std::fs::read_to_string(&export).unwrap();
        assert!(content.contains("\"Grand Hotel, Downtown\""));
    }

    #[test]
    fn test_append_progress_accumulates_lines() {
        let dir = tempdir().unwrap();
        let progress = dir.path().join("progress.log");
        let sink = FileSink::new(dir.path().join("hotels.csv"), &progress);

        sink.append_progress("Scraped 3 hotels from Tehran").unwrap();
        sink.append_progress("Scraped 1 hotels from Shiraz").unwrap();

        let content = std::fs::read_to_string(&progress).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Scraped 3 hotels from Tehran",
                "Scraped 1 hotels from Shiraz"
            ]
        );
    }

    #[test]
    fn test_flush_fails_on_unwritable_path() {
        let sink = FileSink::new("/nonexistent/dir/hotels.csv", "/nonexistent/dir/progress.log");
        let columns = ExportColumns {
            city: false,
            rating: false,
        };
        assert!(sink.flush(&[], columns).is_err());
        assert!(sink.append_progress("line").is_err());
    }
}
