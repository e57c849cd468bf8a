//! Rule-based fallback scoring
//!
//! The deterministic safety net used whenever the AI path yields nothing
//! usable. Pure function of the request, no external calls, always succeeds.
//! The weights are the reference behavior inherited from the rule-based
//! fallback this service replaces; they are not a tuned scoring model.

use serde_json::json;

use crate::model::{AnalysisKind, AnalysisRequest, Classification};
use crate::service::analysis::VerdictCandidate;

/// Terms evoking credential harvesting, urgency, or financial lures
const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "login", "verify", "bank", "secure", "account", "password", "update", "confirm", "urgent",
    "invoice", "winner", "claim",
];

const URL_BASELINE: i64 = 10;
const TEXT_BASELINE: i64 = 15;
const KEYWORD_PENALTY: i64 = 40;
const INSECURE_TRANSPORT_PENALTY: i64 = 20;
const SCAM_THRESHOLD: i64 = 70;

const RECOMMENDATION: &str = "Proceed with caution. This result is based on rule-based checks.";

/// Score a request with deterministic rules
pub fn score(request: &AnalysisRequest) -> VerdictCandidate {
    let content = request.content().to_lowercase();

    let mut score = match request.kind() {
        AnalysisKind::Url => URL_BASELINE,
        AnalysisKind::Email | AnalysisKind::Message => TEXT_BASELINE,
    };

    // Leading reason discloses the rule-based origin so callers can tell
    // heuristic verdicts from AI-derived ones.
    let mut reasons = vec!["AI analysis unavailable. Result produced by rule-based checks.".to_string()];
    let mut rule_fired = false;

    if SUSPICIOUS_KEYWORDS.iter().any(|k| content.contains(k)) {
        score += KEYWORD_PENALTY;
        rule_fired = true;
        reasons.push("Content contains suspicious keywords.".to_string());
    }

    if request.kind() == AnalysisKind::Url && !content.starts_with("https://") {
        score += INSECURE_TRANSPORT_PENALTY;
        rule_fired = true;
        reasons.push("URL is not using HTTPS.".to_string());
    }

    let classification = if score > SCAM_THRESHOLD {
        Classification::Scam
    } else if rule_fired {
        Classification::Suspicious
    } else {
        Classification::Genuine
    };

    VerdictCandidate {
        classification: Some(classification.as_str().to_string()),
        risk_score: Some(json!(score)),
        reasons,
        recommendation: RECOMMENDATION.to_string(),
    }
}
