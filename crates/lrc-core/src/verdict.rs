//! Verdict model and the serializable shape handed to consumers.

use serde::Serialize;

/// Classification outcome for a URL.
///
/// A verdict is immutable once constructed; the cache replaces entries
/// wholesale rather than mutating a verdict in place.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// No threat found.
    Safe {
        /// True when produced by the fast threat-list path; false when a
        /// deep scan has confirmed the URL as benign.
        fast_path: bool,
        /// Diagnostic note attached to fail-open results (the check itself
        /// failed and we defaulted to safe).
        note: Option<String>,
    },
    /// A provider matched the URL against known threats.
    Unsafe {
        /// Human-readable threat labels, in provider order.
        threat_labels: Vec<String>,
        /// Deep-scan maliciousness score, when one was reported.
        score: Option<f64>,
    },
    /// No lookup was possible and nothing was cached (e.g. the input could
    /// not be parsed as a URL).
    Unknown { reason: String },
}

impl Verdict {
    /// Plain fast-path safe verdict (threat list came back empty).
    pub fn safe() -> Self {
        Verdict::Safe {
            fast_path: true,
            note: None,
        }
    }

    /// Fail-open safe verdict carrying a diagnostic note.
    pub fn safe_with_note(note: impl Into<String>) -> Self {
        Verdict::Safe {
            fast_path: true,
            note: Some(note.into()),
        }
    }

    pub fn is_safe(&self) -> bool {
        matches!(self, Verdict::Safe { .. })
    }
}

/// Consumer-facing verdict shape.
///
/// This is the entire surface the tooltip/UI layer depends on: every state,
/// including failures, maps into this struct, so consumers never handle
/// errors out of band. Serialized as camelCase JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictReport {
    pub is_safe: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub threats: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Primary verdict preserved across a deep-scan overwrite, for
    /// diagnostics/audit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_check: Option<Box<VerdictReport>>,
}

impl VerdictReport {
    /// Convert a verdict, optionally attaching the pre-overwrite verdict a
    /// deep scan preserved.
    pub fn from_verdict(verdict: &Verdict, original_check: Option<&Verdict>) -> Self {
        let mut report = match verdict {
            Verdict::Safe { note, .. } => VerdictReport {
                is_safe: true,
                threats: Vec::new(),
                score: None,
                error: note.clone(),
                original_check: None,
            },
            Verdict::Unsafe {
                threat_labels,
                score,
            } => VerdictReport {
                is_safe: false,
                threats: threat_labels.clone(),
                score: *score,
                error: None,
                original_check: None,
            },
            Verdict::Unknown { reason } => VerdictReport {
                is_safe: false,
                threats: Vec::new(),
                score: None,
                error: Some(reason.clone()),
                original_check: None,
            },
        };
        report.original_check =
            original_check.map(|v| Box::new(VerdictReport::from_verdict(v, None)));
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_report_shape() {
        let r = VerdictReport::from_verdict(&Verdict::safe(), None);
        assert!(r.is_safe);
        assert!(r.threats.is_empty());
        assert!(r.error.is_none());
    }

    #[test]
    fn fail_open_report_keeps_is_safe_true_with_error() {
        let v = Verdict::safe_with_note("threat list check failed: HTTP 500");
        let r = VerdictReport::from_verdict(&v, None);
        assert!(r.is_safe);
        assert_eq!(
            r.error.as_deref(),
            Some("threat list check failed: HTTP 500")
        );
    }

    #[test]
    fn unknown_report_is_not_safe() {
        let v = Verdict::Unknown {
            reason: "not a checkable URL: ???".to_string(),
        };
        let r = VerdictReport::from_verdict(&v, None);
        assert!(!r.is_safe);
        assert!(r.error.is_some());
    }

    #[test]
    fn unsafe_report_serializes_camel_case() {
        let v = Verdict::Unsafe {
            threat_labels: vec!["SOCIAL ENGINEERING".to_string()],
            score: Some(80.0),
        };
        let r = VerdictReport::from_verdict(&v, Some(&Verdict::safe()));
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"isSafe\":false"));
        assert!(json.contains("\"threats\":[\"SOCIAL ENGINEERING\"]"));
        assert!(json.contains("\"score\":80.0"));
        assert!(json.contains("\"originalCheck\":{\"isSafe\":true}"));
    }
}
