//! Outbound-link liveness verification
//!
//! Each newly discovered outbound link gets exactly one probe with the short
//! timeout. Probes run on their own task pool, concurrently with the main
//! crawl; a slow external host never stalls the frontier.

use crate::crawler::fetcher::{probe_url, ProbeOutcome};
use crate::state::CrawlState;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Probes outbound links and records the broken ones
///
/// Cheap to clone: one clone per spawned probe task.
#[derive(Clone)]
pub struct Verifier {
    client: Client,
    timeout: Duration,
    state: Arc<CrawlState>,
}

impl Verifier {
    pub fn new(client: Client, timeout: Duration, state: Arc<CrawlState>) -> Self {
        Self {
            client,
            timeout,
            state,
        }
    }

    /// Issues the single verification probe for a new outbound link
    ///
    /// The caller has already inserted the target into the outbound set and
    /// confirmed it was a first sighting, so this never runs twice for the
    /// same target.
    pub async fn verify(&self, target: Url) {
        match probe_url(&self.client, target.as_str(), self.timeout).await {
            ProbeOutcome::Live => {
                tracing::trace!("outbound link live: {}", target);
            }
            ProbeOutcome::Broken(reason) => {
                tracing::debug!("outbound link broken ({}): {}", reason, target);
                self.state.record_broken(target);
            }
        }
    }
}
