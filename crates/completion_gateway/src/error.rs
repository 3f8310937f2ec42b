use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Deployment-configuration fault, not a per-request fault.
    #[error("Server configuration error: API key missing.")]
    MissingApiKey,

    #[error("Malformed request body: {0}")]
    MalformedRequest(String),

    #[error("Failed to generate AI response: {0}")]
    Upstream(String),
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            GatewayError::MethodNotAllowed => HttpResponse::MethodNotAllowed()
                .insert_header(("Allow", "POST"))
                .json(json!({ "message": "Method Not Allowed" })),
            GatewayError::MissingApiKey => HttpResponse::InternalServerError()
                .json(json!({ "error": "Server configuration error: API key missing." })),
            GatewayError::MalformedRequest(details) => HttpResponse::BadRequest().json(json!({
                "error": "Malformed request body.",
                "details": details,
            })),
            GatewayError::Upstream(details) => HttpResponse::InternalServerError().json(json!({
                "error": "Failed to generate AI response.",
                "details": details,
            })),
        }
    }
}
