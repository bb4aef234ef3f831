//! Crawl coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that drives a run end to end:
//! - Walking the configured sources strictly in order
//! - The per-source page cycle: fetch, extract, decide how to continue
//! - Deduplicating records into the run's single `CrawlState`
//! - Isolating per-source failures so one bad source cannot end the run
//! - Appending a progress line after every finished source
//! - Flushing the export and releasing the fetcher on every exit path
//!
//! The coordinator only talks to the `PageFetcher`, `RecordExtractor` and
//! `ResultSink` traits; swapping any collaborator leaves the loop untouched.

use crate::config::Config;
use crate::crawler::extractor::{Continuation, RecordExtractor, SelectorExtractor};
use crate::crawler::fetcher::{HttpFetcher, Page, PageFetcher};
use crate::model::Source;
use crate::output::{line_for, ExportColumns, FileSink, ResultSink};
use crate::state::{CrawlState, SourceOutcome, SourceReport};
use crate::{Result, SweepError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// How the next page of a source will be reached
enum Step {
    /// Fetch an absolute URL built from the source's template
    Fetch(String),
    /// Follow a continuation target from the current page
    Follow(Page, String),
}

/// Drives one crawl run over the configured sources
pub struct Coordinator {
    config: Config,
    fetcher: Box<dyn PageFetcher>,
    extractor: Box<dyn RecordExtractor>,
    sink: Box<dyn ResultSink>,
    columns: ExportColumns,
    cancel: Arc<AtomicBool>,
    state: CrawlState,
}

impl Coordinator {
    /// Creates a coordinator from its collaborators
    ///
    /// The export column set is fixed here, before any page is fetched, so
    /// every source writes rows of the same shape.
    pub fn new(
        config: Config,
        fetcher: Box<dyn PageFetcher>,
        extractor: Box<dyn RecordExtractor>,
        sink: Box<dyn ResultSink>,
    ) -> Self {
        let columns = ExportColumns::from_config(&config);
        Self {
            config,
            fetcher,
            extractor,
            sink,
            columns,
            cancel: Arc::new(AtomicBool::new(false)),
            state: CrawlState::new(),
        }
    }

    /// Flag that stops the run at the next source boundary when set
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// The run's accumulated state
    ///
    /// Remains available after `run` returns, including after a failed
    /// flush, so callers can inspect or retry with the records intact.
    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    /// The column set the export will use
    pub fn columns(&self) -> ExportColumns {
        self.columns
    }

    /// Runs the crawl: every source in order, then the final flush
    ///
    /// Individual page failures abandon only their source. The fetcher is
    /// released before this returns on every path; only a flush failure
    /// surfaces as an error.
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!(sources = self.config.source.len(), "starting crawl");
        let start_time = Instant::now();

        self.crawl_sources().await;
        self.fetcher.shutdown().await;

        self.sink.flush(self.state.records(), self.columns)?;

        tracing::info!(
            unique = self.state.unique_count(),
            found = self.state.total_found(),
            elapsed = ?start_time.elapsed(),
            "crawl finished"
        );
        Ok(())
    }

    /// Walks the source list, checking for cancellation between sources
    async fn crawl_sources(&mut self) {
        let sources = self.config.source.clone();
        let total = sources.len();

        for (index, source) in sources.iter().enumerate() {
            if self.cancel.load(Ordering::SeqCst) {
                tracing::info!(
                    remaining = total - index,
                    "cancellation requested, skipping remaining sources"
                );
                for skipped in &sources[index..] {
                    self.state.push_report(SourceReport::skipped(skipped.label()));
                }
                break;
            }

            tracing::info!(
                source = source.label(),
                "crawling source {} of {}",
                index + 1,
                total
            );
            let report = self.crawl_source(source).await;
            tracing::info!(
                source = report.label.as_str(),
                pages = report.pages_fetched,
                found = report.records_found,
                new = report.records_new,
                outcome = %report.outcome,
                "source finished"
            );

            if let Some(line) = line_for(&report) {
                if let Err(e) = self.sink.append_progress(&line) {
                    tracing::warn!(error = %e, "failed to append progress line");
                }
            }
            self.state.push_report(report);
        }
    }

    /// Walks one source page by page until it is exhausted or fails
    ///
    /// The cycle per page: fetch, extract, fold records into the run state,
    /// then decide the next step from the continuation signal. A fetch
    /// error ends the source as `Failed` but keeps everything the completed
    /// pages contributed.
    async fn crawl_source(&mut self, source: &Source) -> SourceReport {
        let mut report = SourceReport {
            label: source.label().to_string(),
            pages_fetched: 0,
            records_found: 0,
            records_new: 0,
            outcome: SourceOutcome::Exhausted,
        };

        let search_url = self.config.extractor.search_url.clone();
        let mut page_no: u32 = 1;
        let mut empty_streak: u32 = 0;

        let mut step = match source.page_url(page_no, search_url.as_deref()) {
            Some(url) => Step::Fetch(url),
            None => {
                tracing::warn!(source = source.label(), "source has no addressable first page");
                return report;
            }
        };

        loop {
            if report.pages_fetched >= self.config.crawler.max_pages_per_source {
                tracing::warn!(
                    source = source.label(),
                    cap = self.config.crawler.max_pages_per_source,
                    "page cap reached, treating source as exhausted"
                );
                break;
            }

            if report.pages_fetched > 0 && self.config.crawler.request_delay_ms > 0 {
                sleep(Duration::from_millis(self.config.crawler.request_delay_ms)).await;
            }

            let fetched = match &step {
                Step::Fetch(url) => self.fetcher.fetch(url).await,
                Step::Follow(page, target) => self.fetcher.follow(page, target).await,
            };

            let page = match fetched {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(
                        source = source.label(),
                        page = page_no,
                        error = %e,
                        "page fetch failed, abandoning source"
                    );
                    report.outcome = SourceOutcome::Failed(e.to_string());
                    return report;
                }
            };
            report.pages_fetched += 1;

            let extraction = self.extractor.extract(source, &page);
            let found = extraction.records.len();
            let mut new_records = 0;
            for record in extraction.records {
                if self.state.insert(record) {
                    new_records += 1;
                }
            }
            report.records_found += found;
            report.records_new += new_records;

            tracing::debug!(
                source = source.label(),
                page = page_no,
                found,
                new = new_records,
                "page extracted"
            );

            // A run of empty pages means the listing is exhausted no matter
            // what the continuation claims
            if found == 0 {
                empty_streak += 1;
                if empty_streak >= self.config.crawler.stop_after_empty_pages {
                    tracing::debug!(
                        source = source.label(),
                        empty_pages = empty_streak,
                        "no records on consecutive pages, treating source as exhausted"
                    );
                    break;
                }
            } else {
                empty_streak = 0;
            }

            page_no += 1;
            step = match extraction.continuation {
                Continuation::NextSource => break,
                Continuation::NextPage => match source.page_url(page_no, search_url.as_deref()) {
                    Some(url) => Step::Fetch(url),
                    None => {
                        tracing::debug!(
                            source = source.label(),
                            "no page placeholder to continue with, treating source as exhausted"
                        );
                        break;
                    }
                },
                Continuation::ClickAndWait { target } => Step::Follow(page, target),
            };
        }

        report
    }
}

/// Runs a crawl with the default collaborators
///
/// Builds the HTTP fetcher, the selector extractor and the file sink from
/// the configuration and drives a full run:
///
/// 1. Build collaborators (a fetcher build failure is fatal, nothing ran)
/// 2. Walk every configured source in order
/// 3. Append a progress line per finished source
/// 4. Release the fetcher session
/// 5. Flush the deduplicated records as CSV
///
/// # Arguments
///
/// * `config` - The validated configuration
///
/// # Returns
///
/// * `Ok(())` - Source list completed (failed sources included) and the
///   export was written
/// * `Err(SweepError)` - Initialization or final persistence failed
///
/// # Example
///
/// ```no_run
/// use hotelsweep::config::load_config;
/// use hotelsweep::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// run_crawl(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<()> {
    let fetcher = HttpFetcher::new(&config.fetch).map_err(SweepError::ResourceInit)?;
    let extractor = SelectorExtractor::new(&config.extractor)?;
    let sink = FileSink::new(&config.output.export_path, &config.output.progress_path);

    let mut coordinator = Coordinator::new(
        config,
        Box::new(fetcher),
        Box::new(extractor),
        Box::new(sink),
    );
    coordinator.run().await
}
