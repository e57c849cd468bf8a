pub mod analyze;
pub mod briefing;
pub mod chat;
pub mod error;
pub mod health;
pub mod openapi;

pub use error::ApiError;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        analyze::analyze,
        chat::chat,
        briefing::briefing,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        crate::model::Verdict,
        crate::model::Classification,
        crate::model::AnalysisKind,
        analyze::AnalyzeRequest,
        chat::ChatRequest,
        chat::ChatResponse,
        briefing::BriefingResponse,
        health::HealthStatus,
        health::ReadinessStatus,
        health::DependencyHealth,
    )),
    tags(
        (name = "analysis", description = "Content risk analysis"),
        (name = "assistant", description = "Security assistant chat and briefing"),
        (name = "health", description = "Liveness and readiness probes")
    ),
    info(
        title = "SafeClick Analyzer API",
        description = "AI-backed phishing/scam classification with a deterministic rule-based fallback"
    )
)]
pub struct ApiDoc;
