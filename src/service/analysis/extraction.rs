//! Structured verdict extraction from raw upstream text
//!
//! Generative providers return anything from clean JSON to JSON wrapped in
//! markdown fences to prose with a payload buried in the middle. The cascade
//! tries progressively more tolerant strategies in a fixed order; a payload
//! missing a required field or carrying an unknown classification label is a
//! parse failure, never auto-corrected.

use serde::Deserialize;
use serde_json::Value;

use crate::model::Classification;
use crate::service::analysis::VerdictCandidate;

/// Upstream text from which no structured verdict could be recovered
#[derive(Debug, thiserror::Error)]
#[error("no structured verdict could be extracted from upstream output")]
pub struct UnparsableOutput;

/// Wire shape of an upstream verdict payload
///
/// All four fields are required; `risk_score` stays a raw JSON value here
/// because repairing a non-numeric score is the validator's job, not a
/// reason to discard an otherwise usable payload.
#[derive(Debug, Deserialize)]
struct WireVerdict {
    classification: String,
    risk_score: Value,
    reasons: Vec<String>,
    recommendation: String,
}

/// Extract a verdict candidate from raw upstream text
pub fn extract(text: &str) -> Result<VerdictCandidate, UnparsableOutput> {
    // Strategy 1: the whole text is the payload
    if let Some(candidate) = try_parse(text) {
        return Ok(candidate);
    }

    // Strategy 2: payload wrapped in code fences
    let stripped = strip_code_fences(text);
    if let Some(candidate) = try_parse(stripped) {
        return Ok(candidate);
    }

    // Strategy 3: payload surrounded by prose; take first '{' to last '}'
    if let Some(delimited) = brace_delimited(text) {
        if let Some(candidate) = try_parse(delimited) {
            return Ok(candidate);
        }
    }

    Err(UnparsableOutput)
}

/// Strict parse of one strategy's output
fn try_parse(text: &str) -> Option<VerdictCandidate> {
    let wire: WireVerdict = serde_json::from_str(text.trim()).ok()?;

    // An unknown label means the provider drifted off the contract; reject
    // rather than guess so the cascade (or the heuristic) takes over.
    Classification::from_label(&wire.classification)?;

    Some(VerdictCandidate {
        classification: Some(wire.classification),
        risk_score: Some(wire.risk_score),
        reasons: wire.reasons,
        recommendation: wire.recommendation,
    })
}

/// Strip leading/trailing markdown code fences and an optional language tag
///
/// A no-op on text that was never fenced.
fn strip_code_fences(text: &str) -> &str {
    let mut s = text.trim();

    if let Some(rest) = s.strip_prefix("```") {
        // Drop the language tag that may follow the opening fence
        s = match rest.split_once('\n') {
            Some((_, body)) => body,
            None => rest,
        };
    }

    s = s.trim_end();
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }

    s.trim()
}

/// Substring from the first '{' to the last '}', inclusive
fn brace_delimited(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CLEAN: &str = r#"{"classification":"SCAM","risk_score":90,"reasons":["x"],"recommendation":"y"}"#;

    #[test]
    fn extracts_clean_json() {
        let candidate = extract(CLEAN).unwrap();
        assert_eq!(candidate.classification.as_deref(), Some("SCAM"));
        assert_eq!(candidate.risk_score, Some(json!(90)));
        assert_eq!(candidate.reasons, vec!["x"]);
        assert_eq!(candidate.recommendation, "y");
    }

    #[test]
    fn extracts_fenced_json_with_leading_prose() {
        let text = format!("Here you go:\n```json\n{CLEAN}\n```");
        let candidate = extract(&text).unwrap();
        assert_eq!(candidate.classification.as_deref(), Some("SCAM"));
        assert_eq!(candidate.risk_score, Some(json!(90)));
    }

    #[test]
    fn extracts_bare_fenced_json() {
        let text = format!("```\n{CLEAN}\n```");
        let candidate = extract(&text).unwrap();
        assert_eq!(candidate.classification.as_deref(), Some("SCAM"));
    }

    #[test]
    fn extracts_json_embedded_in_prose() {
        let text = format!("Certainly! Based on my analysis: {CLEAN} Stay safe out there.");
        let candidate = extract(&text).unwrap();
        assert_eq!(candidate.recommendation, "y");
    }

    #[test]
    fn rejects_missing_field() {
        let text = r#"{"classification":"SCAM","risk_score":90,"reasons":["x"]}"#;
        assert!(extract(text).is_err());
    }

    #[test]
    fn rejects_unknown_classification_label() {
        let text =
            r#"{"classification":"DANGEROUS","risk_score":90,"reasons":["x"],"recommendation":"y"}"#;
        assert!(extract(text).is_err());
    }

    #[test]
    fn accepts_legacy_label_alias() {
        let text =
            r#"{"classification":"MALICIOUS","risk_score":90,"reasons":["x"],"recommendation":"y"}"#;
        let candidate = extract(text).unwrap();
        assert_eq!(candidate.classification.as_deref(), Some("MALICIOUS"));
    }

    #[test]
    fn keeps_non_numeric_score_for_validation() {
        let text =
            r#"{"classification":"SCAM","risk_score":"high","reasons":["x"],"recommendation":"y"}"#;
        let candidate = extract(text).unwrap();
        assert_eq!(candidate.risk_score, Some(json!("high")));
    }

    #[test]
    fn rejects_plain_prose() {
        assert!(extract("This URL looks perfectly fine to me.").is_err());
    }

    #[test]
    fn fence_stripping_is_noop_on_unfenced_text() {
        assert_eq!(strip_code_fences(CLEAN), CLEAN);
    }
}
