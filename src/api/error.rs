use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    /// A failure reported by the object store. `details` is passed through
    /// to the caller untouched.
    #[error("{error}: {details}")]
    Storage { error: &'static str, details: String },
}

impl AppError {
    pub fn storage(error: &'static str, source: &anyhow::Error) -> Self {
        AppError::Storage {
            error,
            details: format!("{:#}", source),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            AppError::PayloadTooLarge(msg) => {
                tracing::warn!("Payload too large: {}", msg);
                (StatusCode::PAYLOAD_TOO_LARGE, json!({ "error": msg }))
            }
            AppError::Storage { error, details } => {
                tracing::error!("{}: {}", error, details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": error, "details": details }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
