//! URL handling module for sitescan
//!
//! This module provides URL normalization, host extraction, and the
//! domain-scoping policy that decides which discovered links are crawled,
//! ignored, or recorded as outbound.

mod domain;
mod normalize;

use crate::config::Config;

// Re-export main functions
pub use domain::{extract_domain, normalize_host};
pub use normalize::{normalize_href, normalize_url, prepare_seed};

/// Scope of a discovered URL relative to the seed domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Same site as the seed - goes to the frontier
    InScope,
    /// Denylisted host - recorded nowhere, never fetched
    Excluded,
    /// Off-site link - recorded as outbound and liveness-checked
    External,
}

impl Scope {
    /// Returns true if the URL should be enqueued for crawling
    pub fn is_crawlable(&self) -> bool {
        matches!(self, Self::InScope)
    }
}

/// Classifies a normalized host against the seed domain and the denylist
///
/// A host is in scope when it equals the seed domain, or when it is empty
/// (the same-origin edge case: a link with no authority stays on this site).
/// The denylist is consulted only for hosts that are not in scope; an entry
/// matches when it appears anywhere in the host, so `facebook.com` also
/// covers `m.facebook.com`.
///
/// Pure function of its inputs; both `seed_domain` and `host` are expected
/// in normalized form (lowercase, `www.` stripped).
pub fn classify_scope(seed_domain: &str, host: &str, config: &Config) -> Scope {
    if host.is_empty() || host == seed_domain {
        return Scope::InScope;
    }

    if config
        .denylist
        .iter()
        .any(|entry| host.contains(entry.domain.as_str()))
    {
        return Scope::Excluded;
    }

    Scope::External
}
