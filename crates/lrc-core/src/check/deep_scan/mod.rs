//! Secondary check: two-step deep-scan protocol.
//!
//! Submit the URL for a private scan, wait for the provider to finish, then
//! fetch the result by scan id. The overall verdict (when present) carries
//! a malicious flag, category labels, and a numeric score.

mod parse;

use std::time::Duration;

use super::error::CheckError;
use super::http;
use super::DeepScan;

/// Overall verdict of a completed deep scan.
#[derive(Debug, Clone)]
pub struct ScanVerdict {
    pub malicious: bool,
    pub categories: Vec<String>,
    pub score: Option<f64>,
}

/// HTTP implementation of the deep-scan protocol.
///
/// `endpoint` is the API base (e.g. `https://urlscan.io/api/v1`); the
/// submit and result paths are derived from it.
#[derive(Debug, Clone)]
pub struct HttpDeepScan {
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl HttpDeepScan {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout,
        }
    }
}

impl DeepScan for HttpDeepScan {
    fn submit(&self, url: &str) -> Result<String, CheckError> {
        if self.endpoint.is_empty() || self.api_key.is_empty() {
            return Err(CheckError::NoEndpoint);
        }
        let body = parse::encode_submit_request(url)?;
        let submit_url = format!("{}/scan/", self.endpoint);
        let response = http::post_json(
            &submit_url,
            &[
                ("Content-Type", "application/json"),
                ("API-Key", &self.api_key),
            ],
            &body,
            self.timeout,
        )?;
        parse::parse_submit_response(&response)
    }

    fn fetch(&self, scan_id: &str) -> Result<Option<ScanVerdict>, CheckError> {
        let result_url = format!("{}/result/{}/", self.endpoint, scan_id);
        let response = http::get_json(&result_url, &[], self.timeout)?;
        parse::parse_result_response(&response)
    }
}
