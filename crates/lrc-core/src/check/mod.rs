//! Outbound reputation checks.
//!
//! The resolver depends only on the two traits here; the HTTP
//! implementations speak the concrete provider protocols. Both are
//! blocking (curl) and are driven through `spawn_blocking`.

pub mod deep_scan;
mod error;
mod http;
pub mod threat_list;

pub use deep_scan::{HttpDeepScan, ScanVerdict};
pub use error::CheckError;
pub use threat_list::HttpThreatList;

/// Fast authoritative threat-list lookup (the primary check).
pub trait ThreatListCheck: Send + Sync {
    /// Check one normalized URL. Returns the matched human-readable threat
    /// labels; an empty list means no threat was found.
    fn check(&self, url: &str) -> Result<Vec<String>, CheckError>;
}

/// Slower deep-scan provider (the secondary check).
pub trait DeepScan: Send + Sync {
    /// Submit a URL for scanning; returns the scan id to fetch results by.
    fn submit(&self, url: &str) -> Result<String, CheckError>;

    /// Fetch the result for a previously submitted scan. `Ok(None)` when
    /// the provider has no overall verdict for it (yet).
    fn fetch(&self, scan_id: &str) -> Result<Option<ScanVerdict>, CheckError>;
}
