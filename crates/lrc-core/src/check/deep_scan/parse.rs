//! Deep-scan wire format: submit/result encoding and parsing.

use serde::{Deserialize, Serialize};

use super::super::error::CheckError;
use super::ScanVerdict;

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    url: &'a str,
    visibility: &'a str,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    uuid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResultResponse {
    verdicts: Option<Verdicts>,
}

#[derive(Debug, Deserialize)]
struct Verdicts {
    overall: Option<OverallVerdict>,
}

#[derive(Debug, Deserialize)]
struct OverallVerdict {
    #[serde(default)]
    malicious: bool,
    #[serde(default)]
    categories: Vec<String>,
    score: Option<f64>,
}

/// Build the scan submission body. Scans are kept private.
pub(super) fn encode_submit_request(url: &str) -> Result<Vec<u8>, CheckError> {
    let request = SubmitRequest {
        url,
        visibility: "private",
    };
    serde_json::to_vec(&request).map_err(|e| CheckError::Malformed(format!("submit request: {e}")))
}

/// Extract the scan id from a submission response. A response without a
/// scan id means there is nothing to fetch later.
pub(super) fn parse_submit_response(body: &[u8]) -> Result<String, CheckError> {
    let response: SubmitResponse = serde_json::from_slice(body)
        .map_err(|e| CheckError::Malformed(format!("submit response: {e}")))?;
    response
        .uuid
        .ok_or_else(|| CheckError::Malformed("submit response has no scan id".to_string()))
}

/// Parse a result payload into an overall verdict.
/// `Ok(None)` when the payload has no overall verdicts section (scan still
/// pending or withheld); the caller drops the refresh in that case.
pub(super) fn parse_result_response(body: &[u8]) -> Result<Option<ScanVerdict>, CheckError> {
    let response: ResultResponse = serde_json::from_slice(body)
        .map_err(|e| CheckError::Malformed(format!("result response: {e}")))?;
    Ok(response
        .verdicts
        .and_then(|v| v.overall)
        .map(|overall| ScanVerdict {
            malicious: overall.malicious,
            categories: overall.categories,
            score: overall.score,
        }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_submit_is_private() {
        let body = encode_submit_request("http://a.example/").unwrap();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["url"], "http://a.example/");
        assert_eq!(v["visibility"], "private");
    }

    #[test]
    fn parse_submit_returns_uuid() {
        let id = parse_submit_response(br#"{"uuid":"0195a-abc","api":"/result/0195a-abc"}"#)
            .unwrap();
        assert_eq!(id, "0195a-abc");
    }

    #[test]
    fn parse_submit_without_uuid_is_malformed() {
        let err = parse_submit_response(br#"{"message":"rate limited"}"#).unwrap_err();
        assert!(matches!(err, CheckError::Malformed(_)));
    }

    #[test]
    fn parse_result_with_overall_verdict() {
        let body = br#"{"verdicts":{"overall":{
            "malicious":true,"categories":["phishing"],"score":80
        }}}"#;
        let verdict = parse_result_response(body).unwrap().unwrap();
        assert!(verdict.malicious);
        assert_eq!(verdict.categories, vec!["phishing"]);
        assert_eq!(verdict.score, Some(80.0));
    }

    #[test]
    fn parse_result_defaults_missing_fields() {
        let body = br#"{"verdicts":{"overall":{"score":0}}}"#;
        let verdict = parse_result_response(body).unwrap().unwrap();
        assert!(!verdict.malicious);
        assert!(verdict.categories.is_empty());
    }

    #[test]
    fn parse_result_without_verdicts_section_is_none() {
        assert!(parse_result_response(b"{}").unwrap().is_none());
        assert!(parse_result_response(br#"{"verdicts":{}}"#).unwrap().is_none());
    }
}
