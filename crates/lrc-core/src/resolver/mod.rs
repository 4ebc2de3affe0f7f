//! Verdict resolver: cache-fronted orchestration of the two checks.
//!
//! `resolve` answers from the cache when it can, otherwise runs the primary
//! threat-list lookup (the only call the caller waits for), writes the
//! result into the cache, and (for safe verdicts) spawns the detached
//! deep-scan refresh. The function is infallible by design: every failure
//! state resolves to a verdict-shaped value.

mod refresh;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::cache::ReputationCache;
use crate::check::{DeepScan, ThreatListCheck};
use crate::url_norm::{self, NormalizedUrl, UrlKey};
use crate::verdict::Verdict;

/// Default wait between submitting a deep scan and fetching its result.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(15);

pub struct VerdictResolver {
    cache: Arc<Mutex<ReputationCache>>,
    threat_list: Arc<dyn ThreatListCheck>,
    deep_scan: Option<Arc<dyn DeepScan>>,
    settle_delay: Duration,
}

impl VerdictResolver {
    /// `deep_scan = None` disables the secondary check entirely.
    pub fn new(
        cache: Arc<Mutex<ReputationCache>>,
        threat_list: Arc<dyn ThreatListCheck>,
        deep_scan: Option<Arc<dyn DeepScan>>,
        settle_delay: Duration,
    ) -> Self {
        Self {
            cache,
            threat_list,
            deep_scan,
            settle_delay,
        }
    }

    /// Handle to the shared cache (for the sweep loop and diagnostics).
    pub fn cache(&self) -> Arc<Mutex<ReputationCache>> {
        Arc::clone(&self.cache)
    }

    /// Resolve a raw URL to its best available verdict.
    ///
    /// The caller waits for the primary check only; the deep scan runs
    /// detached and never retroactively changes an already-returned
    /// verdict. Concurrent calls for the same key are not coalesced: both
    /// hit the primary provider and the last write wins, which is
    /// idempotent here.
    pub async fn resolve(&self, raw_url: &str) -> Verdict {
        let normalized = match url_norm::normalize(raw_url) {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(raw_url, "cannot check link: {e:#}");
                return Verdict::Unknown {
                    reason: format!("{e:#}"),
                };
            }
        };
        let key = UrlKey::from_normalized(&normalized);

        {
            let cache = self.cache.lock().await;
            if let Some(entry) = cache.get(&key, Instant::now()) {
                tracing::debug!(url = %normalized, "cache hit");
                return entry.verdict.clone();
            }
        }

        tracing::debug!(url = %normalized, "cache miss, running threat list check");
        let verdict = self.primary_verdict(&normalized).await;

        // Cache unconditionally (fail-open results included) so repeated
        // hovers inside the TTL stay off the network.
        {
            let mut cache = self.cache.lock().await;
            cache.put(key, verdict.clone(), Instant::now());
        }

        if verdict.is_safe() {
            if let Some(scanner) = &self.deep_scan {
                tokio::spawn(refresh::run_deep_scan_refresh(
                    Arc::clone(&self.cache),
                    Arc::clone(scanner),
                    key,
                    normalized.as_str().to_string(),
                    self.settle_delay,
                ));
            }
        }

        verdict
    }

    /// Run the primary check, converting every failure into a fail-open
    /// safe verdict with a diagnostic note.
    async fn primary_verdict(&self, url: &NormalizedUrl) -> Verdict {
        let threat_list = Arc::clone(&self.threat_list);
        let target = url.as_str().to_string();
        let outcome = tokio::task::spawn_blocking(move || threat_list.check(&target)).await;

        match outcome {
            Ok(Ok(labels)) if labels.is_empty() => Verdict::safe(),
            Ok(Ok(labels)) => {
                tracing::info!(url = %url, threats = ?labels, "threat list matched");
                Verdict::Unsafe {
                    threat_labels: labels,
                    score: None,
                }
            }
            Ok(Err(e)) => {
                tracing::warn!(url = %url, error = %e, "threat list check failed, defaulting to safe");
                Verdict::safe_with_note(format!("threat list check failed: {e}"))
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "threat list task failed, defaulting to safe");
                Verdict::safe_with_note(format!("threat list check failed: {e}"))
            }
        }
    }
}
