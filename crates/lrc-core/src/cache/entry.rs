//! Cache entry type.

use std::time::Instant;

use crate::verdict::Verdict;

/// One cached reputation result.
///
/// Owned exclusively by [`super::ReputationCache`]; written only through the
/// resolver's write path. `written_at` is set by the primary write and kept
/// across a deep-scan overwrite, so the freshness bound always counts from
/// the first lookup.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub verdict: Verdict,
    pub written_at: Instant,
    /// Primary verdict displaced by a deep-scan overwrite, kept for
    /// diagnostics/audit. `None` until a deep scan lands.
    pub original_check: Option<Verdict>,
}

impl CacheEntry {
    pub(super) fn new(verdict: Verdict, written_at: Instant) -> Self {
        Self {
            verdict,
            written_at,
            original_check: None,
        }
    }
}
