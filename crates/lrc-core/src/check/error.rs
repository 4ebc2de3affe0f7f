//! Provider error taxonomy.

use thiserror::Error;

/// Error from a reputation provider call.
///
/// Classified so the resolver can apply its propagation policy: primary
/// failures convert to a fail-open safe verdict, secondary failures are
/// logged and dropped. None of these ever reach the consumer as an error.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Transport-level failure (timeout, connection, DNS, TLS).
    #[error("network: {0}")]
    Network(#[from] curl::Error),
    /// Provider answered with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Response arrived but did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The provider is not configured (missing endpoint or API key).
    #[error("no provider endpoint configured")]
    NoEndpoint,
}
