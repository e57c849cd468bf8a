use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// The kind of content submitted for analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Url,
    Email,
    Message,
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisKind::Url => write!(f, "url"),
            AnalysisKind::Email => write!(f, "email"),
            AnalysisKind::Message => write!(f, "message"),
        }
    }
}

/// Rejected input, reported to the caller rather than absorbed
#[derive(Debug, thiserror::Error)]
#[error("invalid input: {0}")]
pub struct InvalidInput(pub String);

/// A normalized analysis request
///
/// Fields are private so a request can only exist in a valid state:
/// non-empty trimmed content with the kind fixed at creation.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    kind: AnalysisKind,
    content: String,
}

impl AnalysisRequest {
    /// Validate and normalize raw content into a request
    pub fn new(kind: AnalysisKind, raw: &str) -> Result<Self, InvalidInput> {
        let content = raw.trim();
        if content.is_empty() {
            return Err(InvalidInput(format!(
                "{kind} content must not be empty"
            )));
        }

        Ok(Self {
            kind,
            content: content.to_string(),
        })
    }

    pub fn kind(&self) -> AnalysisKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Severity tier of an analysis verdict, ordered by increasing risk
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Genuine,
    Suspicious,
    Scam,
}

impl Classification {
    /// Parse a provider-supplied label into the closed enumeration
    ///
    /// Labels from earlier provider prompt iterations (SAFE, MALICIOUS) are
    /// normalized here so only one enumeration exists past this boundary.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "GENUINE" | "SAFE" => Some(Classification::Genuine),
            "SUSPICIOUS" => Some(Classification::Suspicious),
            "SCAM" | "MALICIOUS" => Some(Classification::Scam),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Genuine => "GENUINE",
            Classification::Suspicious => "SUSPICIOUS",
            Classification::Scam => "SCAM",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical analysis result returned to every caller
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Verdict {
    pub classification: Classification,
    /// Risk score in [0, 100]
    pub risk_score: u8,
    /// At least one reason, in the order they were determined
    pub reasons: Vec<String>,
    /// Never empty
    pub recommendation: String,
}
