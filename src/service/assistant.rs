//! Conversational assistant endpoints' backing service
//!
//! Thin pass-through to the generative provider for the chat box and the
//! daily briefing widget. Both degrade to fixed texts when the provider is
//! unavailable, mirroring the never-throw contract of the analysis pipeline.

use std::sync::Arc;

use crate::service::analysis::prompts::BRIEFING_PROMPT;
use crate::service::gemini::GenerativeProvider;

const FALLBACK_REPLY: &str = "I'm having trouble responding right now. Please try again later.";

const FALLBACK_BRIEFING: &str = "Daily briefing is temporarily unavailable. Stay alert for phishing links, fake login pages, and suspicious messages.";

pub struct AssistantService {
    provider: Arc<dyn GenerativeProvider>,
}

impl AssistantService {
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self { provider }
    }

    /// Answer a free-form question; never fails
    pub async fn ask(&self, question: &str) -> String {
        match self.provider.generate(question).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "Chat reply unavailable, returning fallback");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Produce a short daily threat briefing; never fails
    pub async fn daily_briefing(&self) -> String {
        match self.provider.generate(BRIEFING_PROMPT).await {
            Ok(briefing) => briefing,
            Err(e) => {
                tracing::warn!(error = %e, "Daily briefing unavailable, returning fallback");
                FALLBACK_BRIEFING.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::gemini::UpstreamError;
    use async_trait::async_trait;

    struct EchoProvider;

    #[async_trait]
    impl GenerativeProvider for EchoProvider {
        async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
            Ok(format!("echo: {prompt}"))
        }
    }

    struct DownProvider;

    #[async_trait]
    impl GenerativeProvider for DownProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, UpstreamError> {
            Err(UpstreamError::Timeout)
        }
    }

    #[tokio::test]
    async fn ask_forwards_question() {
        let service = AssistantService::new(Arc::new(EchoProvider));
        assert_eq!(service.ask("is this safe?").await, "echo: is this safe?");
    }

    #[tokio::test]
    async fn ask_degrades_to_fallback_reply() {
        let service = AssistantService::new(Arc::new(DownProvider));
        assert_eq!(service.ask("is this safe?").await, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn briefing_degrades_to_fallback_text() {
        let service = AssistantService::new(Arc::new(DownProvider));
        assert_eq!(service.daily_briefing().await, FALLBACK_BRIEFING);
    }
}
