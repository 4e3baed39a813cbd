use crate::AppState;
use crate::api::error::AppError;
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use super::types::*;

/// Deletes one object. The key is everything after `/api/files/`, so keys
/// containing `/` may be sent either raw or percent-encoded.
#[utoipa::path(
    delete,
    path = "/api/files/{key}",
    params(
        ("key" = String, Path, description = "Object key, e.g. uploads/1700000000000-report.pdf")
    ),
    responses(
        (status = 200, description = "File deleted (also when the key did not exist)", body = DeleteResponse),
        (status = 400, description = "Key is not valid percent-encoded UTF-8", body = ErrorResponse),
        (status = 500, description = "Object store failure", body = ErrorResponse)
    ),
    tag = "files"
)]
pub async fn delete_file(
    State(state): State<AppState>,
    key: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    let Path(key) = key.map_err(|e| AppError::BadRequest(e.body_text()))?;

    state
        .file_service
        .delete(&key)
        .await
        .map_err(|e| AppError::storage("Delete failed", &e))?;

    Ok(Json(DeleteResponse {
        success: true,
        message: "File deleted successfully".to_string(),
    }))
}
