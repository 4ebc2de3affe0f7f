//! Threat-list lookup wire format: request encoding and response parsing.

use serde::{Deserialize, Serialize};

use super::super::error::CheckError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    client: Client<'a>,
    threat_info: ThreatInfo<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Client<'a> {
    client_id: &'a str,
    client_version: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreatInfo<'a> {
    threat_types: &'a [&'a str],
    platform_types: [&'a str; 1],
    threat_entry_types: [&'a str; 1],
    threat_entries: [ThreatEntry<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ThreatEntry<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    matches: Vec<ThreatMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreatMatch {
    threat_type: String,
}

/// Build the JSON lookup body for a single URL.
pub(super) fn encode_lookup_request(
    client_id: &str,
    client_version: &str,
    threat_types: &[&str],
    url: &str,
) -> Result<Vec<u8>, CheckError> {
    let request = LookupRequest {
        client: Client {
            client_id,
            client_version,
        },
        threat_info: ThreatInfo {
            threat_types,
            platform_types: ["ANY_PLATFORM"],
            threat_entry_types: ["URL"],
            threat_entries: [ThreatEntry { url }],
        },
    };
    serde_json::to_vec(&request).map_err(|e| CheckError::Malformed(format!("lookup request: {e}")))
}

/// Parse a lookup response into human-readable threat labels.
/// An absent or empty `matches` list means no threat was found.
pub(super) fn parse_lookup_response(body: &[u8]) -> Result<Vec<String>, CheckError> {
    let response: LookupResponse = serde_json::from_slice(body)
        .map_err(|e| CheckError::Malformed(format!("lookup response: {e}")))?;
    Ok(response
        .matches
        .into_iter()
        .map(|m| m.threat_type.replace('_', " "))
        .collect())
}
