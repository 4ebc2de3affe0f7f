//! In-memory reputation cache with TTL-based freshness.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::url_norm::UrlKey;
use crate::verdict::Verdict;

use super::entry::CacheEntry;

/// Time-bounded map from URL key to last-known verdict.
///
/// The cache is process-local and best-effort: it accelerates repeated
/// lookups, it is not a durable store. The clock is injected by passing
/// `now` into every operation so tests can drive expiry deterministically.
/// No capacity bound is enforced; growth is bounded by the periodic sweep.
#[derive(Debug)]
pub struct ReputationCache {
    entries: HashMap<UrlKey, CacheEntry>,
    ttl: Duration,
}

impl ReputationCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a fresh entry. A stale entry reads as absent but is left in
    /// place for the sweep to collect (lazy invalidation).
    pub fn get(&self, key: &UrlKey, now: Instant) -> Option<&CacheEntry> {
        self.entries
            .get(key)
            .filter(|e| now.duration_since(e.written_at) < self.ttl)
    }

    /// Insert or overwrite the entry for `key` with `written_at = now`.
    /// Last write wins; any previous entry (including its preserved
    /// original check) is discarded.
    pub fn put(&mut self, key: UrlKey, verdict: Verdict, now: Instant) {
        self.entries.insert(key, CacheEntry::new(verdict, now));
    }

    /// Guarded overwrite used when a deep-scan result lands.
    ///
    /// If the entry has expired or been deleted since the scan was
    /// submitted, the result is dropped; a deleted entry is never
    /// re-created. Otherwise the verdict is replaced, the displaced verdict
    /// moves into `original_check`, and `written_at` is left untouched.
    /// Returns whether the overwrite happened.
    pub fn apply_deep_scan(&mut self, key: &UrlKey, verdict: Verdict, now: Instant) -> bool {
        let ttl = self.ttl;
        let Some(entry) = self
            .entries
            .get_mut(key)
            .filter(|e| now.duration_since(e.written_at) < ttl)
        else {
            return false;
        };
        entry.original_check = Some(std::mem::replace(&mut entry.verdict, verdict));
        true
    }

    /// Delete every entry whose age has reached the TTL. Runs on a fixed
    /// period independent of read traffic, so one-off URLs that are never
    /// re-queried still get evicted.
    pub fn sweep(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, e| now.duration_since(e.written_at) < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
