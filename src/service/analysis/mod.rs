//! Content risk analysis pipeline
//!
//! Sequences normalization, the upstream classification call, extraction and
//! validation, substituting the rule-based scorer whenever the AI path fails.
//! Every invocation that gets past input validation produces a schema-valid
//! verdict; no upstream condition escapes to the caller.

use std::sync::Arc;

use serde_json::Value;

use crate::model::{AnalysisKind, AnalysisRequest, Verdict};
use crate::service::gemini::GenerativeProvider;

pub mod error;
pub mod extraction;
pub mod heuristics;
pub mod prompts;
pub mod validation;

pub use error::AnalysisError;

/// A verdict-shaped payload before validation
///
/// Loose on purpose: the extractor and the heuristic both produce one, and
/// the validator turns any of them into a canonical `Verdict`.
#[derive(Debug, Clone, Default)]
pub struct VerdictCandidate {
    pub classification: Option<String>,
    pub risk_score: Option<Value>,
    pub reasons: Vec<String>,
    pub recommendation: String,
}

/// Service orchestrating the classification pipeline
pub struct AnalysisService {
    provider: Arc<dyn GenerativeProvider>,
}

impl AnalysisService {
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self { provider }
    }

    /// Analyze user-supplied content and produce a risk verdict
    ///
    /// The only error is `InvalidInput`; upstream failures and unparsable
    /// output fall back to the deterministic heuristic and are logged, not
    /// surfaced.
    pub async fn analyze(
        &self,
        kind: AnalysisKind,
        content: &str,
    ) -> Result<Verdict, AnalysisError> {
        let request = AnalysisRequest::new(kind, content)?;

        let start_time = std::time::Instant::now();
        let prompt = prompts::build_classification_prompt(&request);

        let candidate = match self.provider.generate(&prompt).await {
            Ok(text) => match extraction::extract(&text) {
                Ok(candidate) => {
                    tracing::info!(
                        kind = %request.kind(),
                        elapsed_ms = start_time.elapsed().as_millis(),
                        "Upstream classification extracted successfully"
                    );
                    candidate
                }
                Err(e) => {
                    tracing::warn!(
                        kind = %request.kind(),
                        error = %e,
                        response_length = text.len(),
                        "Upstream output unparsable, falling back to rule-based checks"
                    );
                    heuristics::score(&request)
                }
            },
            Err(e) => {
                tracing::warn!(
                    kind = %request.kind(),
                    error = %e,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    "Upstream classification failed, falling back to rule-based checks"
                );
                heuristics::score(&request)
            }
        };

        Ok(validation::validate(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Classification;
    use crate::service::gemini::UpstreamError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider stub that always returns the same text
    struct FixedProvider(String);

    #[async_trait]
    impl GenerativeProvider for FixedProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, UpstreamError> {
            Ok(self.0.clone())
        }
    }

    /// Provider stub that always fails, counting how often it was called
    struct FailingProvider {
        calls: AtomicUsize,
    }

    impl FailingProvider {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl GenerativeProvider for FailingProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(UpstreamError::Transport("connection refused".to_string()))
        }
    }

    fn assert_invariants(verdict: &Verdict) {
        assert!(verdict.risk_score <= 100);
        assert!(!verdict.reasons.is_empty());
        assert!(!verdict.recommendation.is_empty());
    }

    #[tokio::test]
    async fn ai_path_returns_extracted_verdict() {
        let reply = "Here you go:\n```json\n{\"classification\":\"SCAM\",\"risk_score\":90,\"reasons\":[\"x\"],\"recommendation\":\"y\"}\n```";
        let service = AnalysisService::new(Arc::new(FixedProvider(reply.to_string())));

        let verdict = service
            .analyze(AnalysisKind::Url, "https://phish.example.com")
            .await
            .unwrap();

        assert_invariants(&verdict);
        assert_eq!(verdict.classification, Classification::Scam);
        assert_eq!(verdict.risk_score, 90);
        assert_eq!(verdict.reasons, vec!["x"]);
        assert_eq!(verdict.recommendation, "y");
    }

    #[tokio::test]
    async fn upstream_failure_falls_back_to_heuristics() {
        let provider = Arc::new(FailingProvider::new());
        let service = AnalysisService::new(provider.clone());

        let verdict = service
            .analyze(AnalysisKind::Url, "http://secure-login-update.com")
            .await
            .unwrap();

        assert_invariants(&verdict);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(verdict.risk_score, 70);
        assert_eq!(verdict.classification, Classification::Suspicious);
        assert!(verdict.reasons[0].contains("rule-based"));
    }

    #[tokio::test]
    async fn unparsable_output_falls_back_to_heuristics() {
        let service = AnalysisService::new(Arc::new(FixedProvider(
            "I could not produce structured output, sorry.".to_string(),
        )));

        let verdict = service
            .analyze(AnalysisKind::Email, "please verify your account")
            .await
            .unwrap();

        assert_invariants(&verdict);
        assert_eq!(verdict.risk_score, 55);
        assert!(verdict.reasons[0].contains("rule-based"));
    }

    #[tokio::test]
    async fn out_of_contract_payload_is_repaired() {
        let service = AnalysisService::new(Arc::new(FixedProvider(
            "{\"classification\":\"SCAM\",\"risk_score\":250,\"reasons\":[\"x\"],\"recommendation\":\"y\"}"
                .to_string(),
        )));

        let verdict = service
            .analyze(AnalysisKind::Message, "you are a winner")
            .await
            .unwrap();

        assert_invariants(&verdict);
        assert_eq!(verdict.risk_score, 100);
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_upstream_call() {
        let provider = Arc::new(FailingProvider::new());
        let service = AnalysisService::new(provider.clone());

        let result = service.analyze(AnalysisKind::Url, "   ").await;

        assert!(result.is_err());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn legacy_labels_are_normalized() {
        let service = AnalysisService::new(Arc::new(FixedProvider(
            "{\"classification\":\"MALICIOUS\",\"risk_score\":95,\"reasons\":[\"known phishing kit\"],\"recommendation\":\"block\"}"
                .to_string(),
        )));

        let verdict = service
            .analyze(AnalysisKind::Url, "http://bad.example")
            .await
            .unwrap();

        assert_eq!(verdict.classification, Classification::Scam);
    }
}
