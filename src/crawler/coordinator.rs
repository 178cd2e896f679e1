//! Crawl orchestration
//!
//! The coordinator drives the whole crawl: it seeds the frontier, runs a
//! bounded pool of fetch workers over it, routes discovered links through
//! the normalize/scope pipeline, hands new outbound links to the probe
//! pool, and assembles the final report.
//!
//! Lifecycle: workers drain the frontier until it is empty and no fetch is
//! in flight; the probe channel then closes and outstanding liveness probes
//! settle; finally the ledgers are snapshotted into a [`CrawlReport`].

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::parser::extract_hrefs;
use crate::crawler::verifier::Verifier;
use crate::output::CrawlReport;
use crate::state::CrawlState;
use crate::url::{classify_scope, extract_domain, normalize_href, Scope};
use crate::{ScanError, UrlError};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use url::Url;

/// How long an idle worker sleeps before re-polling the frontier
const IDLE_POLL: Duration = Duration::from_millis(25);

/// How many pages between progress log lines
const PROGRESS_EVERY: usize = 25;

/// Everything a fetch worker needs, shared by `Arc`
struct WorkerContext {
    config: Arc<Config>,
    client: Client,
    state: Arc<CrawlState>,
    seed_domain: String,
    probe_tx: mpsc::UnboundedSender<Url>,
}

/// Main crawl coordinator
///
/// Owns the crawl state for one invocation; `run` consumes the coordinator
/// and yields the report.
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    state: Arc<CrawlState>,
    seed: Url,
    seed_domain: String,
}

impl Coordinator {
    /// Creates a coordinator for a crawl starting at `seed`
    ///
    /// The seed must already be normalized (see [`crate::url::prepare_seed`]).
    pub fn new(seed: Url, config: Config) -> Result<Self, ScanError> {
        let client = build_http_client(&config.user_agent)?;
        let seed_domain = extract_domain(&seed).ok_or(UrlError::MissingHost)?;
        let state = Arc::new(CrawlState::new(seed.clone()));

        Ok(Self {
            config: Arc::new(config),
            client,
            state,
            seed,
            seed_domain,
        })
    }

    /// Runs the crawl to completion and assembles the report
    pub async fn run(self) -> Result<CrawlReport, ScanError> {
        let start = Instant::now();
        tracing::info!(
            "starting crawl of {} ({} workers)",
            self.seed,
            self.config.crawler.max_concurrent_fetches
        );

        let (probe_tx, probe_rx) = mpsc::unbounded_channel();

        let verifier = Verifier::new(
            self.client.clone(),
            Duration::from_secs(self.config.crawler.probe_timeout_secs),
            Arc::clone(&self.state),
        );
        let probe_pool = tokio::spawn(run_probe_pool(
            probe_rx,
            verifier,
            self.config.crawler.max_concurrent_probes as usize,
        ));

        let context = Arc::new(WorkerContext {
            config: Arc::clone(&self.config),
            client: self.client.clone(),
            state: Arc::clone(&self.state),
            seed_domain: self.seed_domain.clone(),
            probe_tx,
        });

        let mut workers = JoinSet::new();
        for worker_id in 0..self.config.crawler.max_concurrent_fetches {
            workers.spawn(run_worker(Arc::clone(&context), worker_id));
        }
        // Workers hold the only senders now; the channel closes when the
        // last worker exits
        drop(context);

        while let Some(result) = workers.join_next().await {
            if let Err(e) = result {
                tracing::error!("fetch worker aborted: {}", e);
            }
        }

        tracing::info!("frontier drained, waiting for outstanding link probes");
        if let Err(e) = probe_pool.await {
            tracing::error!("probe pool aborted: {}", e);
        }

        let elapsed = start.elapsed();
        let report =
            CrawlReport::assemble(self.seed.as_str(), self.state.take_snapshot(), elapsed);

        tracing::info!(
            "crawl finished: {} pages, {} outbound, {} broken in {:.2}s",
            report.pages_scanned,
            report.outbound_links.len(),
            report.broken_links.len(),
            report.elapsed_seconds
        );

        Ok(report)
    }
}

/// Fetch worker loop
///
/// Exits only when the frontier is empty AND no other worker still has a
/// target in flight - an in-flight fetch may yet refill the frontier.
async fn run_worker(context: Arc<WorkerContext>, worker_id: u32) {
    loop {
        match context.state.next_target() {
            Some(target) => {
                tracing::debug!(worker_id, "processing {}", target);
                process_target(&context, &target).await;
                context.state.target_done();

                let progress = context.state.progress();
                if progress.pages_scanned > 0 && progress.pages_scanned % PROGRESS_EVERY == 0 {
                    tracing::info!(
                        "progress: {} pages scanned, {} queued, {} outbound, {} broken",
                        progress.pages_scanned,
                        progress.frontier_len,
                        progress.outbound,
                        progress.broken
                    );
                }
            }
            None => {
                if context.state.is_idle() {
                    tracing::debug!(worker_id, "frontier exhausted, worker exiting");
                    return;
                }
                tokio::time::sleep(IDLE_POLL).await;
            }
        }
    }
}

/// Fetches one in-domain page and feeds its links back into the crawl
///
/// Every failure path records the target as broken and returns; nothing
/// here can abort the crawl.
async fn process_target(context: &WorkerContext, target: &Url) {
    // Defensive: the frontier's ledger should make this impossible, but a
    // revisit must never double-count a page
    if context.state.is_visited(target) {
        tracing::warn!("dequeued an already-visited target: {}", target);
        return;
    }

    let timeout = Duration::from_secs(context.config.crawler.page_timeout_secs);
    match fetch_page(&context.client, target.as_str(), timeout).await {
        FetchOutcome::Success { status, body } => {
            context.state.mark_visited(target.clone());
            if status >= 400 {
                tracing::debug!("page {} returned HTTP {}, parsing anyway", target, status);
            }
            handle_discovered_links(context, target, &body);
        }
        FetchOutcome::NotFound => {
            tracing::debug!("broken page (404): {}", target);
            context.state.record_broken(target.clone());
        }
        FetchOutcome::Failed(reason) => {
            tracing::warn!("fetch failed ({}): {}", reason, target);
            context.state.record_broken(target.clone());
        }
    }
}

/// Runs extracted hrefs through the normalize/scope pipeline
fn handle_discovered_links(context: &WorkerContext, page: &Url, body: &str) {
    for href in extract_hrefs(body) {
        let normalized = match normalize_href(&href, page) {
            Ok(url) => url,
            Err(e) => {
                tracing::trace!("dropping href {:?}: {}", href, e);
                continue;
            }
        };

        let host = extract_domain(&normalized).unwrap_or_default();
        match classify_scope(&context.seed_domain, &host, &context.config) {
            Scope::InScope => {
                if context.state.enqueue(normalized.clone()) {
                    tracing::trace!("enqueued {}", normalized);
                }
            }
            Scope::Excluded => {
                tracing::trace!("denylisted host, skipping {}", normalized);
            }
            Scope::External => {
                // First sighting wins; the send only happens for targets
                // that just entered the outbound set
                if context.state.record_outbound(normalized.clone()) {
                    // Receiver only drops after all senders are gone
                    let _ = context.probe_tx.send(normalized);
                }
            }
        }
    }
}

/// Drains the probe channel into a bounded pool of verification tasks
///
/// Runs alongside the fetch workers; finishes once every worker has exited
/// (closing the channel) and the last probe has settled.
async fn run_probe_pool(
    mut probe_rx: mpsc::UnboundedReceiver<Url>,
    verifier: Verifier,
    max_concurrent: usize,
) {
    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let mut probes = JoinSet::new();

    while let Some(target) = probe_rx.recv().await {
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(p) => p,
            // Closed semaphore cannot happen; bail rather than spin
            Err(_) => break,
        };
        let verifier = verifier.clone();
        probes.spawn(async move {
            let _permit = permit;
            verifier.verify(target).await;
        });
    }

    while let Some(result) = probes.join_next().await {
        if let Err(e) = result {
            tracing::error!("link probe aborted: {}", e);
        }
    }
}
