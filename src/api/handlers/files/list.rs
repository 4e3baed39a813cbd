use crate::AppState;
use crate::api::error::AppError;
use axum::{Json, extract::State};

use super::types::*;

#[utoipa::path(
    get,
    path = "/api/files",
    responses(
        (status = 200, description = "Files under the uploads prefix", body = ListFilesResponse),
        (status = 500, description = "Object store failure", body = ErrorResponse)
    ),
    tag = "files"
)]
pub async fn list_files(
    State(state): State<AppState>,
) -> Result<Json<ListFilesResponse>, AppError> {
    let files = state
        .file_service
        .list()
        .await
        .map_err(|e| AppError::storage("Failed to list files", &e))?;

    Ok(Json(ListFilesResponse {
        success: true,
        files,
    }))
}
