use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

/// Maximum number of alternative slots echoed back on a conflict.
pub const MAX_SUGGESTED_SLOTS: usize = 10;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Validation failed: {}", .0.join("; "))]
    InvalidSubmission(Vec<String>),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Requested time slot is not available")]
    SlotConflict { available_slots: Vec<String> },
    #[error("Rejected by provider: {message}")]
    Rejected { message: String, details: Option<String> },
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

impl AppError {
    pub fn rejected(message: impl Into<String>) -> Self {
        AppError::Rejected { message: message.into(), details: None }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body): (StatusCode, Value) = match self {
            AppError::Configuration(msg) => {
                error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "success": false, "error": msg }))
            }
            AppError::InvalidSubmission(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": "Validation failed", "details": details }),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "success": false, "error": msg })),
            AppError::SlotConflict { mut available_slots } => {
                available_slots.truncate(MAX_SUGGESTED_SLOTS);
                (
                    StatusCode::CONFLICT,
                    json!({
                        "success": false,
                        "available": false,
                        "error": "Requested time slot is not available",
                        "availableSlots": available_slots,
                    }),
                )
            }
            AppError::Rejected { message, details } => {
                let mut body = json!({ "success": false, "error": message });
                if let Some(details) = details {
                    body["details"] = Value::String(details);
                }
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "success": false, "error": msg })),
            AppError::ProviderUnavailable(msg) => {
                error!("Upstream provider unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({ "success": false, "error": "Scheduling provider is temporarily unavailable" }),
                )
            }
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "success": false, "error": "Internal error" }))
            }
        };

        (status, Json(body)).into_response()
    }
}
