//! Hotelsweep main entry point
//!
//! This is the command-line interface for the hotelsweep listing crawler.

use chrono::Local;
use clap::Parser;
use hotelsweep::config::{load_config_with_hash, Config};
use hotelsweep::crawler::{Coordinator, HttpFetcher, SelectorExtractor};
use hotelsweep::model::Source;
use hotelsweep::output::{print_report, ExportColumns, FileSink};
use hotelsweep::SweepError;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;

/// Hotelsweep: a multi-source hotel listing crawler
///
/// Hotelsweep walks a configured list of city pages and search terms,
/// extracts hotel listings with CSS selectors, deduplicates them across
/// sources, and writes a CSV export plus a progress log.
#[derive(Parser, Debug)]
#[command(name = "hotelsweep")]
#[command(version = "1.0.0")]
#[command(about = "A multi-source hotel listing crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hotelsweep=info,warn"),
            1 => EnvFilter::new("hotelsweep=debug,info"),
            2 => EnvFilter::new("hotelsweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Hotelsweep Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!(
        "  Max pages per source: {}",
        config.crawler.max_pages_per_source
    );
    println!(
        "  Stop after empty pages: {}",
        config.crawler.stop_after_empty_pages
    );

    println!("\nFetch:");
    println!("  User agent: {}", config.fetch.user_agent);
    println!("  Timeout: {}s", config.fetch.timeout_secs);

    println!("\nExtractor:");
    println!("  Card selectors:");
    for selector in &config.extractor.card_selectors {
        println!("    * {}", selector);
    }
    println!("  Name selector: {}", config.extractor.name_selector);
    if let Some(selector) = &config.extractor.city_selector {
        println!("  City selector: {}", selector);
    }
    if let Some(selector) = &config.extractor.rating_selector {
        println!("  Rating selector: {}", selector);
    }
    if let Some(selector) = &config.extractor.next_page_selector {
        println!("  Next page selector: {}", selector);
    }
    if let Some(template) = &config.extractor.search_url {
        println!("  Search URL: {}", template);
    }

    let columns = ExportColumns::from_config(config);
    println!("\nOutput:");
    println!("  Export: {}", config.output.export_path);
    println!("  Progress log: {}", config.output.progress_path);
    println!("  Columns: {}", columns.header().join(", "));

    println!("\nSources ({}):", config.source.len());
    for source in &config.source {
        match source {
            Source::City { name, url } => println!("  - {} ({})", name, url),
            Source::SearchTerm { term } => println!("  - search: {}", term),
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} sources", config.source.len());

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let started_at = Local::now();
    let export_path = config.output.export_path.clone();

    let fetcher = HttpFetcher::new(&config.fetch).map_err(SweepError::ResourceInit)?;
    let extractor = SelectorExtractor::new(&config.extractor)?;
    let sink = FileSink::new(&config.output.export_path, &config.output.progress_path);

    let mut coordinator = Coordinator::new(
        config,
        Box::new(fetcher),
        Box::new(extractor),
        Box::new(sink),
    );

    // Ctrl-C lets the current source finish, then stops at the boundary
    let cancel = coordinator.cancel_flag();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("interrupt received, finishing current source");
                cancel.store(true, Ordering::SeqCst);
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for shutdown signal");
            }
        }
    });

    match coordinator.run().await {
        Ok(()) => {
            print_report(coordinator.state(), started_at, Local::now());
            println!("\n✓ Export written to: {}", export_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
