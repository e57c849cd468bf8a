use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod model;
mod service;

use model::Config;
use service::{AnalysisService, AssistantService, GeminiClient};
use service::gemini::GenerativeProvider;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    if !GeminiClient::has_credentials() {
        tracing::warn!(
            "GEMINI_API_KEY is not set; all analyses will use the rule-based fallback"
        );
    }

    // One provider shared by the analysis pipeline and the assistant
    let provider: Arc<dyn GenerativeProvider> =
        Arc::new(GeminiClient::new(config.upstream.clone()));

    let analysis_service = web::Data::new(AnalysisService::new(Arc::clone(&provider)));
    let assistant_service = web::Data::new(AssistantService::new(provider));

    tracing::info!("Starting SafeClick analyzer server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(analysis_service.clone())
            .app_data(assistant_service.clone())
            .configure(api::analyze::configure)
            .configure(api::chat::configure)
            .configure(api::briefing::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
