//! Sitescan command-line interface
//!
//! Submit a URL, get back a crawl report: pages scanned, outbound links,
//! broken links.

use anyhow::Context;
use clap::Parser;
use sitescan::config::{default_config, load_config};
use sitescan::output::print_report;
use sitescan::url::prepare_seed;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitescan: single-site broken-link scanner
///
/// Crawls a website from the given URL, staying within its domain, and
/// reports scanned pages, distinct outbound links, and broken links.
#[derive(Parser, Debug)]
#[command(name = "sitescan")]
#[command(version)]
#[command(about = "Scan a website for broken and outbound links", long_about = None)]
struct Cli {
    /// URL to start crawling from (https:// is assumed if omitted)
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the number of concurrent page fetches
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also write the JSON report to a file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => default_config()?,
    };

    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_fetches = concurrency;
        sitescan::config::validate(&config).context("invalid --concurrency value")?;
    }

    let seed = prepare_seed(&cli.url)
        .with_context(|| format!("cannot interpret '{}' as a URL", cli.url))?;

    let report = sitescan::crawl(seed, config).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(path) = &cli.output {
        report
            .write_json(path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        tracing::info!("report written to {}", path.display());
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitescan=info,warn"),
            1 => EnvFilter::new("sitescan=debug,info"),
            2 => EnvFilter::new("sitescan=trace,debug"),
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
