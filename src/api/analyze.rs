//! REST API endpoint for content risk analysis

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::ApiError;
use crate::model::AnalysisKind;
use crate::service::AnalysisService;

/// Request body for an analysis
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// What the content is: url, email or message
    pub kind: AnalysisKind,
    /// The content to analyze
    pub content: String,
}

/// Analyze content for phishing and scam risk
///
/// Always returns a schema-valid verdict for accepted input; the rule-based
/// fallback covers every upstream failure.
#[utoipa::path(
    post,
    path = "/v1/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis completed", body = crate::model::Verdict),
        (status = 400, description = "Empty or invalid content")
    ),
    tag = "analysis"
)]
#[post("/v1/analyze")]
pub async fn analyze(
    service: web::Data<AnalysisService>,
    body: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let verdict = service.analyze(body.kind, &body.content).await?;
    Ok(HttpResponse::Ok().json(verdict))
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classification, Verdict};
    use crate::service::gemini::{GenerativeProvider, UpstreamError};
    use actix_web::{App, test};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct DownProvider;

    #[async_trait]
    impl GenerativeProvider for DownProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, UpstreamError> {
            Err(UpstreamError::MissingCredentials)
        }
    }

    fn service_data() -> web::Data<AnalysisService> {
        web::Data::new(AnalysisService::new(Arc::new(DownProvider)))
    }

    #[actix_web::test]
    async fn analyze_returns_verdict_for_valid_input() {
        let app = test::init_service(
            App::new().app_data(service_data()).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/analyze")
            .set_json(serde_json::json!({
                "kind": "url",
                "content": "http://secure-login-update.com"
            }))
            .to_request();

        let verdict: Verdict = test::call_and_read_body_json(&app, req).await;
        assert_eq!(verdict.classification, Classification::Suspicious);
        assert_eq!(verdict.risk_score, 70);
        assert!(!verdict.reasons.is_empty());
    }

    #[actix_web::test]
    async fn analyze_rejects_blank_content_with_verdict_shaped_body() {
        let app = test::init_service(
            App::new().app_data(service_data()).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/analyze")
            .set_json(serde_json::json!({"kind": "url", "content": "   "}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let verdict: Verdict = test::read_body_json(resp).await;
        assert_eq!(verdict.classification, Classification::Suspicious);
        assert!(!verdict.reasons.is_empty());
        assert!(!verdict.recommendation.is_empty());
    }
}
