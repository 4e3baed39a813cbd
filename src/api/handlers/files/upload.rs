use crate::AppState;
use crate::api::error::AppError;
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use bytes::BytesMut;

use super::types::*;

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Stores the first `file` field of the form under a fresh `uploads/` key.
///
/// The body is buffered in memory and capped at the configured maximum file
/// size; nothing reaches the store when the cap is exceeded.
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data", description = "File upload"),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadResponse),
        (status = 400, description = "No file in the request", body = ErrorResponse),
        (status = 413, description = "File exceeds the size limit", body = ErrorResponse),
        (status = 500, description = "Object store failure", body = ErrorResponse)
    ),
    tag = "files"
)]
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let max_file_size = state.config.max_file_size;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        // A plain text field named "file" is not a file.
        let Some(file_name) = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
        else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);

        let mut data = BytesMut::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            if data.len() + chunk.len() > max_file_size {
                return Err(AppError::PayloadTooLarge(format!(
                    "File exceeds the maximum size of {} bytes",
                    max_file_size
                )));
            }
            data.extend_from_slice(&chunk);
        }

        let result = state
            .file_service
            .upload(&file_name, content_type.as_deref(), data.freeze())
            .await
            .map_err(|e| AppError::storage("Upload failed", &e))?;

        return Ok(Json(UploadResponse {
            success: true,
            message: "File uploaded successfully".to_string(),
            data: result,
        }));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}
