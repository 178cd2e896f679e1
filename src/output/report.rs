//! Crawl report assembly and rendering
//!
//! The report is the crawl's single product: an immutable snapshot built
//! once when the frontier and probe pool have drained.

use crate::state::LedgerSnapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// Immutable result of one crawl invocation
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// The seed URL the crawl started from, in normalized form
    pub start_url: String,

    /// Count of successfully fetched and parsed in-domain pages
    pub pages_scanned: usize,

    /// Distinct external links, lexicographically sorted
    pub outbound_links: Vec<String>,

    /// Links whose fetch 404ed or failed at the transport level, sorted
    pub broken_links: Vec<String>,

    /// Wall-clock crawl duration in seconds
    pub elapsed_seconds: f64,

    /// When the report was assembled
    pub generated_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Builds the report from the final crawl ledgers
    ///
    /// Link lists are sorted lexicographically so output is deterministic
    /// for a given set of discoveries, regardless of worker interleaving.
    pub fn assemble(start_url: &str, snapshot: LedgerSnapshot, elapsed: Duration) -> Self {
        let mut outbound_links: Vec<String> = snapshot
            .outbound
            .into_iter()
            .map(|url| url.into())
            .collect();
        outbound_links.sort();

        let mut broken_links: Vec<String> =
            snapshot.broken.into_iter().map(|url| url.into()).collect();
        broken_links.sort();

        Self {
            start_url: start_url.to_string(),
            pages_scanned: snapshot.pages_scanned,
            outbound_links,
            broken_links,
            elapsed_seconds: elapsed.as_secs_f64(),
            generated_at: Utc::now(),
        }
    }

    /// Writes the JSON serialization of the report to a file
    pub fn write_json(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Prints the report to stdout in a human-readable format
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report: {} ===\n", report.start_url);

    println!("Pages scanned: {}", report.pages_scanned);
    println!("Elapsed: {:.2}s", report.elapsed_seconds);
    println!();

    println!("Outbound Links ({}):", report.outbound_links.len());
    for link in &report.outbound_links {
        println!("  - {}", link);
    }
    println!();

    println!("Broken Links ({}):", report.broken_links.len());
    for link in &report.broken_links {
        println!("  - {}", link);
    }
}
