//! REST API endpoint for the daily threat briefing

use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::service::AssistantService;

/// Daily briefing text (markdown, rendered client-side)
#[derive(Debug, Serialize, ToSchema)]
pub struct BriefingResponse {
    pub briefing: String,
}

/// Get a short daily cybersecurity threat briefing
#[utoipa::path(
    get,
    path = "/v1/briefing",
    responses(
        (status = 200, description = "Briefing produced", body = BriefingResponse)
    ),
    tag = "assistant"
)]
#[get("/v1/briefing")]
pub async fn briefing(service: web::Data<AssistantService>) -> impl Responder {
    let briefing = service.daily_briefing().await;
    HttpResponse::Ok().json(BriefingResponse { briefing })
}

/// Configure briefing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(briefing);
}
