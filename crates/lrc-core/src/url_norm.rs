//! URL normalization and cache key derivation.
//!
//! Every lookup and every cache slot is keyed by the normalized form of the
//! input, so two spellings of the same link share one reputation entry.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use anyhow::{Context, Result};

/// A URL string guaranteed to carry an explicit scheme.
///
/// Inputs without a scheme are prefixed with `http://` before parsing; the
/// canonical string form produced by the parser is what callers see. Two
/// inputs that normalize identically compare (and hash) identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a raw link target into a canonical absolute URL.
///
/// `example.com/x` becomes `http://example.com/x`; inputs that already carry
/// `http://` or `https://` keep their scheme. Anything the URL parser still
/// rejects (or that has no host) is an error; there is nothing meaningful
/// to look up for such input.
pub fn normalize(raw: &str) -> Result<NormalizedUrl> {
    let raw = raw.trim();
    let candidate = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };

    let parsed = url::Url::parse(&candidate)
        .with_context(|| format!("not a checkable URL: {raw}"))?;
    if parsed.host_str().is_none() {
        anyhow::bail!("URL has no host: {raw}");
    }

    Ok(NormalizedUrl(parsed.into()))
}

/// Cache key: a 64-bit hash of the normalized URL.
///
/// Determinism within the process is all that is required; a collision
/// merely makes two URLs share a cache slot, which degrades freshness, not
/// safety decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UrlKey(u64);

impl UrlKey {
    pub fn from_normalized(url: &NormalizedUrl) -> Self {
        let mut hasher = DefaultHasher::new();
        url.0.hash(&mut hasher);
        UrlKey(hasher.finish())
    }
}
