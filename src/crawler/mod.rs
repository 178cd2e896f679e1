//! Crawler module: fetching, parsing, verification, orchestration
//!
//! The coordinator pulls targets from the frontier, the fetcher talks HTTP,
//! the parser turns page bodies into raw hrefs, and the verifier
//! liveness-checks outbound links on its own task pool.

mod coordinator;
mod fetcher;
mod parser;
mod verifier;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, fetch_page, probe_url, FetchError, FetchOutcome, ProbeOutcome};
pub use parser::extract_hrefs;
pub use verifier::Verifier;

use crate::config::Config;
use crate::output::CrawlReport;
use crate::ScanError;
use url::Url;

/// Runs a complete crawl of the site at `seed`
///
/// The seed must already be normalized (see [`crate::url::prepare_seed`]).
/// Per-URL failures are reported as broken links; the returned error covers
/// only startup problems such as an unbuildable HTTP client.
pub async fn crawl(seed: Url, config: Config) -> Result<CrawlReport, ScanError> {
    Coordinator::new(seed, config)?.run().await
}
