//! Upstream generative provider client (Google Gemini)
//!
//! Pure transport: builds the generateContent request, enforces the call
//! deadline, maps provider conditions to typed failures and hands the raw
//! response text back untouched. Interpreting that text is the extraction
//! cascade's job.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::UpstreamConfig;

const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Ways a single upstream call can fail
///
/// All of these are absorbed by the orchestrator; none is ever surfaced to
/// the caller of `analyze`.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream API key is not configured")]
    MissingCredentials,

    #[error("upstream call exceeded its deadline")]
    Timeout,

    #[error("upstream rate limited the request")]
    RateLimited,

    #[error("upstream returned an empty response")]
    EmptyResponse,

    #[error("upstream transport error: {0}")]
    Transport(String),
}

/// Seam for the generative provider, so services can be exercised with stubs
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Issue exactly one best-effort generation call for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Join the text of all parts of the first candidate
    ///
    /// Gemini has shipped several response shapes; joining part texts with a
    /// space tolerates all of them.
    fn reply_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }
}

/// Client for the Gemini generateContent endpoint
pub struct GeminiClient {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl GeminiClient {
    pub fn new(config: UpstreamConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("safeclick/1.0")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, config }
    }

    /// Whether a credential is present, without revealing it
    pub fn has_credentials() -> bool {
        env::var(ENV_GEMINI_API_KEY).map_or(false, |k| !k.trim().is_empty())
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            api_key
        )
    }
}

#[async_trait]
impl GenerativeProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        // Fail fast before any network traffic when unconfigured
        let api_key = env::var(ENV_GEMINI_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(UpstreamError::MissingCredentials)?;

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_length = prompt.len(),
            "Issuing upstream generateContent call"
        );

        let response = self
            .client
            .post(self.endpoint(&api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout
                } else {
                    UpstreamError::Transport(e.to_string())
                }
            })?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(model = %self.config.model, "Upstream rate limited");
            return Err(UpstreamError::RateLimited);
        }

        if !response.status().is_success() {
            return Err(UpstreamError::Transport(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let reply = parsed.reply_text();
        if reply.trim().is_empty() {
            return Err(UpstreamError::EmptyResponse);
        }

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_text_joins_parts() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hello"}, {"text": "world"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.reply_text(), "Hello world");
    }

    #[test]
    fn reply_text_handles_missing_candidates() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.reply_text(), "");
    }

    #[test]
    fn reply_text_skips_textless_parts() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{}, {"text": "only"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.reply_text(), "only");
    }

    #[test]
    fn endpoint_builds_versioned_path() {
        let client = GeminiClient::new(UpstreamConfig {
            base_url: "https://example.test/".to_string(),
            model: "gemini-pro".to_string(),
            timeout_secs: 5,
        });
        assert_eq!(
            client.endpoint("k"),
            "https://example.test/v1beta/models/gemini-pro:generateContent?key=k"
        );
    }
}
