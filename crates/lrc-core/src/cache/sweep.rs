//! Background task that periodically purges expired cache entries.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use super::ReputationCache;

/// Runs the periodic sweep: every `period`, drop entries older than the
/// cache TTL. Spawn this with `tokio::spawn`; it runs until the process
/// exits. The period must be materially smaller than the TTL so the
/// staleness bound holds within one sweep interval.
pub async fn run_sweep_loop(cache: Arc<Mutex<ReputationCache>>, period: std::time::Duration) {
    let mut ticker = tokio::time::interval(period);
    // First tick fires immediately; skip it so a fresh process doesn't
    // sweep an empty map.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let mut cache = cache.lock().await;
        let before = cache.len();
        cache.sweep(Instant::now());
        let removed = before - cache.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = cache.len(), "cache sweep");
        }
    }
}
