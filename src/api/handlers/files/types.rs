use crate::models::{StoredFile, UploadResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ListFilesResponse {
    pub success: bool,
    pub files: Vec<StoredFile>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub data: UploadResult,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// Body of every failed request.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Multipart form accepted by the upload endpoint.
#[derive(ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
