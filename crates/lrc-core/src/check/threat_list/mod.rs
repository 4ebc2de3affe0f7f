//! Primary check: authoritative threat-list lookup.
//!
//! One POST against a Safe Browsing v4 `threatMatches:find` endpoint,
//! matching the URL against a fixed threat/platform taxonomy. An empty
//! match list means safe.

mod parse;

use std::time::Duration;

use super::error::CheckError;
use super::http;
use super::ThreatListCheck;

/// Identity sent in the lookup request's `client` section.
const CLIENT_ID: &str = "lrc-link-checker";
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Threat categories the lookup matches against.
const THREAT_TYPES: [&str; 4] = [
    "MALWARE",
    "SOCIAL_ENGINEERING",
    "UNWANTED_SOFTWARE",
    "POTENTIALLY_HARMFUL_APPLICATION",
];

/// HTTP implementation of the threat-list lookup.
#[derive(Debug, Clone)]
pub struct HttpThreatList {
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl HttpThreatList {
    /// `endpoint` is the full `threatMatches:find` URL; the API key is
    /// appended as a query parameter per the provider's auth scheme.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout,
        }
    }
}

impl ThreatListCheck for HttpThreatList {
    fn check(&self, url: &str) -> Result<Vec<String>, CheckError> {
        if self.endpoint.is_empty() {
            return Err(CheckError::NoEndpoint);
        }
        let body = parse::encode_lookup_request(CLIENT_ID, CLIENT_VERSION, &THREAT_TYPES, url)?;
        let api_url = format!("{}?key={}", self.endpoint, self.api_key);
        let response = http::post_json(
            &api_url,
            &[("Content-Type", "application/json")],
            &body,
            self.timeout,
        )?;
        parse::parse_lookup_response(&response)
    }
}
