//! Report output
//!
//! Assembles the crawl's final counts and link lists into a [`CrawlReport`]
//! and renders it as text or JSON.

mod report;

pub use report::{print_report, CrawlReport};
