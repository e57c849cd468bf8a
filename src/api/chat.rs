//! REST API endpoint for the security assistant chat

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::ApiError;
use crate::service::AssistantService;

/// Request body for a chat message
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// The user's question
    pub message: String,
}

/// Chat reply
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
}

/// Ask the security assistant a question
#[utoipa::path(
    post,
    path = "/v1/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant replied", body = ChatResponse),
        (status = 400, description = "Message is required")
    ),
    tag = "assistant"
)]
#[post("/v1/chat")]
pub async fn chat(
    service: web::Data<AssistantService>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, ApiError> {
    if body.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }

    let reply = service.ask(&body.message).await;
    Ok(HttpResponse::Ok().json(ChatResponse { reply }))
}

/// Configure chat routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(chat);
}
