//! Unified API error handling
//!
//! Consistent error response format across all endpoints. Rejected analysis
//! input gets a verdict-shaped body so UI consumers can render it with the
//! same widget as any other result.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use uuid::Uuid;

use crate::service::analysis::{validation, AnalysisError, VerdictCandidate};

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Analysis input rejected (400, verdict-shaped body)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Bad request / validation error (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal_error",
        };

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        if let ApiError::InvalidInput(message) = self {
            // The rejection is still reported as 400, but the body carries a
            // repaired verdict describing the invalid input so result
            // widgets never see a malformed shape.
            let verdict = validation::validate(VerdictCandidate {
                classification: Some("SUSPICIOUS".to_string()),
                risk_score: None,
                reasons: vec![message.clone()],
                recommendation: "Please try again later.".to_string(),
            });
            return HttpResponse::build(status).json(verdict);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidInput(e) => ApiError::InvalidInput(e.0),
        }
    }
}
