//! URL reputation cache.
//!
//! In-memory map from a normalized-URL key to its last-known verdict plus a
//! freshness timestamp. The cache owns expiry: reads treat stale entries as
//! absent (lazy invalidation) and a periodic sweep deletes them outright.
//! It is created by the composition root and shared with the resolver and
//! the sweep task behind `Arc<tokio::sync::Mutex<..>>`.

mod entry;
mod state;
mod sweep;

pub use entry::CacheEntry;
pub use state::ReputationCache;
pub use sweep::run_sweep_loop;
