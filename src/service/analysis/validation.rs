//! Verdict validation and repair
//!
//! The last stop before a verdict reaches a caller. Never rejects: every
//! candidate, however mangled, becomes a verdict satisfying the invariants
//! (score in [0, 100], classification in the closed enumeration, at least
//! one reason, non-empty recommendation). Each repair appends a reason so
//! the caller can see what was fixed.

use crate::model::{Classification, Verdict};
use crate::service::analysis::VerdictCandidate;

/// Neutral score applied when the candidate carries none
const DEFAULT_RISK_SCORE: u8 = 50;

/// Recommendation applied when the candidate carries none
const DEFAULT_RECOMMENDATION: &str =
    "Proceed with caution and verify the content manually before acting on it.";

/// Score above which a derived classification is SCAM
const SCAM_THRESHOLD: u8 = 70;

/// Lowest score any scoring rule produces; at or above this a derived
/// classification is SUSPICIOUS
const ELEVATED_THRESHOLD: u8 = 30;

/// Normalize a candidate into an invariant-preserving verdict
pub fn validate(candidate: VerdictCandidate) -> Verdict {
    let mut reasons: Vec<String> = candidate
        .reasons
        .into_iter()
        .filter(|r| !r.trim().is_empty())
        .collect();

    let risk_score = match candidate.risk_score.as_ref().and_then(numeric_score) {
        Some(score) => score.clamp(0, 100) as u8,
        None => {
            reasons.push(format!(
                "Risk score was missing or not numeric; defaulted to {DEFAULT_RISK_SCORE}."
            ));
            DEFAULT_RISK_SCORE
        }
    };

    let classification = match candidate
        .classification
        .as_deref()
        .and_then(Classification::from_label)
    {
        Some(c) => c,
        None => {
            let derived = derive_classification(risk_score);
            reasons.push(format!(
                "Classification was missing or unrecognized; derived {derived} from the risk score."
            ));
            derived
        }
    };

    if reasons.is_empty() {
        reasons.push("No reasons were supplied; verdict fields were repaired to safe defaults.".to_string());
    }

    let recommendation = if candidate.recommendation.trim().is_empty() {
        reasons.push("Recommendation was missing; substituted a cautionary default.".to_string());
        DEFAULT_RECOMMENDATION.to_string()
    } else {
        candidate.recommendation
    };

    Verdict {
        classification,
        risk_score,
        reasons,
        recommendation,
    }
}

/// Derive a classification tier from a score alone
pub fn derive_classification(score: u8) -> Classification {
    if score > SCAM_THRESHOLD {
        Classification::Scam
    } else if score >= ELEVATED_THRESHOLD {
        Classification::Suspicious
    } else {
        Classification::Genuine
    }
}

/// Coerce a JSON value into an integer score, if it is numeric at all
fn numeric_score(value: &serde_json::Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value.as_f64().map(|f| f.round() as i64)
}
