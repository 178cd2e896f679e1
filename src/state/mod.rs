//! Crawl state tracking
//!
//! One crawl invocation owns one [`CrawlState`]: the frontier queue plus the
//! visited, outbound, and broken ledgers, shared across workers.

mod crawl_state;
mod frontier;

pub use crawl_state::{CrawlState, LedgerSnapshot, Progress};
pub use frontier::Frontier;
