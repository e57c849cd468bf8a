//! Prompts for upstream content classification

use crate::model::AnalysisRequest;

/// Output contract appended to every classification prompt
///
/// Demands exactly the four verdict fields with no surrounding prose, to
/// maximize the odds of directly parseable output. Providers still wrap or
/// pad the payload often enough that the extraction cascade exists.
const OUTPUT_CONTRACT: &str = r#"Respond with ONLY a JSON object containing exactly these four fields (no markdown fences, no explanation outside the JSON):
{"classification": "GENUINE" | "SUSPICIOUS" | "SCAM", "risk_score": <integer 0-100>, "reasons": ["..."], "recommendation": "..."}"#;

/// Build the classification prompt for a normalized request
pub fn build_classification_prompt(request: &AnalysisRequest) -> String {
    use crate::model::AnalysisKind;

    let task = match request.kind() {
        AnalysisKind::Url => format!(
            "Analyze this URL for phishing, scams, or security risks: {}",
            request.content()
        ),
        AnalysisKind::Email => format!(
            "Analyze this email for phishing or scam risks:\n\n{}",
            request.content()
        ),
        AnalysisKind::Message => format!(
            "Analyze this message for scam or phishing intent:\n\n{}",
            request.content()
        ),
    };

    format!("{task}\n\n{OUTPUT_CONTRACT}")
}

/// Prompt for the daily threat briefing
pub const BRIEFING_PROMPT: &str =
    "Give a short daily cybersecurity threat briefing with 2-3 points.";
