//! Detached deep-scan refresh task.
//!
//! Spawned by the resolver after a safe primary verdict; never awaited by
//! any caller. Its only externally visible effect is a best-effort guarded
//! cache overwrite. Every failure is logged and swallowed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::sync::Mutex;

use crate::cache::ReputationCache;
use crate::check::DeepScan;
use crate::url_norm::UrlKey;
use crate::verdict::Verdict;

pub(super) async fn run_deep_scan_refresh(
    cache: Arc<Mutex<ReputationCache>>,
    scanner: Arc<dyn DeepScan>,
    key: UrlKey,
    url: String,
    settle_delay: Duration,
) {
    match refresh_once(&cache, &scanner, key, &url, settle_delay).await {
        Ok(true) => tracing::debug!(url = %url, "deep scan refreshed cache entry"),
        Ok(false) => tracing::debug!(url = %url, "deep scan result dropped"),
        Err(e) => tracing::debug!(url = %url, "deep scan failed: {e:#}"),
    }
}

/// Submit, wait out the settle delay, fetch, overwrite. Returns whether the
/// cache entry was actually refreshed.
async fn refresh_once(
    cache: &Arc<Mutex<ReputationCache>>,
    scanner: &Arc<dyn DeepScan>,
    key: UrlKey,
    url: &str,
    settle_delay: Duration,
) -> Result<bool> {
    let scan_id = {
        let scanner = Arc::clone(scanner);
        let url = url.to_string();
        tokio::task::spawn_blocking(move || scanner.submit(&url))
            .await
            .context("scan submit task join")?
            .context("scan submit")?
    };

    // The provider scans asynchronously; give it time to complete before
    // asking for the result.
    tokio::time::sleep(settle_delay).await;

    let outcome = {
        let scanner = Arc::clone(scanner);
        tokio::task::spawn_blocking(move || scanner.fetch(&scan_id))
            .await
            .context("scan result task join")?
            .context("scan result")?
    };

    let Some(scan) = outcome else {
        // No overall verdict (scan pending or withheld); the cached primary
        // verdict stands.
        return Ok(false);
    };

    let verdict = if scan.malicious {
        Verdict::Unsafe {
            threat_labels: scan.categories,
            score: scan.score,
        }
    } else {
        Verdict::Safe {
            fast_path: false,
            note: None,
        }
    };

    // Guarded overwrite: if the entry expired or was swept while the scan
    // ran, the result is dropped rather than re-creating the entry.
    let mut cache = cache.lock().await;
    Ok(cache.apply_deep_scan(&key, verdict, Instant::now()))
}
