//! Price Tracker main entry point
//!
//! This is the command-line interface for the product page tracker.

use clap::Parser;
use price_tracker::config::{load_config_with_hash, Config};
use price_tracker::crawler::run_tracker;
use price_tracker::output::{print_statistics, write_csv_file, write_html_report, ReportStats};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Price Tracker: product page scraper for e-commerce sites
///
/// Fetches the configured product pages (or the products linked from category
/// pages), extracts name, price, stock status and image, and writes a CSV file
/// plus an HTML report.
#[derive(Parser, Debug)]
#[command(name = "price-tracker")]
#[command(version = "1.0.0")]
#[command(about = "Scrapes product pages into CSV and an HTML report", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the CSV output path from the config file
    #[arg(short, long, value_name = "CSV")]
    output: Option<PathBuf>,

    /// Validate config and show what would be fetched without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_run(config, cli.quiet).await?;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("price_tracker=info,warn"),
            1 => EnvFilter::new("price_tracker=debug,info"),
            2 => EnvFilter::new("price_tracker=trace,debug"),
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

/// Handles the --dry-run mode: shows the resolved settings
fn handle_dry_run(config: &Config) {
    println!("=== Price Tracker Dry Run ===\n");

    println!("Targets ({}):", config.targets.urls.len());
    for url in &config.targets.urls {
        println!("  - {} [{}]", url, price_tracker::classify(url));
    }

    println!("\nCategory mode: {}", config.category.enable_category_mode);
    if config.category.enable_category_mode {
        println!("  Max products: {}", config.category.max_products);
        println!(
            "  Link selector: {}",
            config.category.product_link_selector
        );
        println!("  Path marker: {}", config.category.product_path_marker);
        println!("  Delay between products: {}ms", config.fetcher.request_delay_ms);
    }

    println!("\nFetcher:");
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  Max retries: {}", config.fetcher.max_retries);
    println!("  Backoff unit: {}ms", config.fetcher.backoff_unit_ms);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  Report: {}", config.output.report_path);
    if let Some(debug) = &config.output.debug_html_path {
        println!("  Debug HTML: {}", debug);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main run: fetch, extract, write outputs
async fn handle_run(config: Config, quiet: bool) -> price_tracker::Result<()> {
    let records = run_tracker(&config).await?;

    let csv_path = Path::new(&config.output.csv_path);
    let report_path = Path::new(&config.output.report_path);

    let csv_result = write_csv_file(&records, csv_path);
    match &csv_result {
        Ok(()) => tracing::info!(
            "Wrote {} records to {}",
            records.len(),
            csv_path.display()
        ),
        Err(e) => tracing::error!("Failed to write CSV {}: {}", csv_path.display(), e),
    }

    let report_result = write_html_report(&records, report_path);
    match &report_result {
        Ok(()) => tracing::info!("Wrote HTML report to {}", report_path.display()),
        Err(e) => tracing::error!(
            "Failed to write HTML report {}: {}",
            report_path.display(),
            e
        ),
    }

    let stats = ReportStats::from_records(&records);
    tracing::info!(
        "Summary: {} products, {} with price, {} with image, {} sites",
        stats.total,
        stats.with_price,
        stats.with_image,
        stats.distinct_sites
    );
    if !quiet {
        print_statistics(&stats);
    }

    csv_result?;
    report_result?;
    Ok(())
}
