pub mod api;
pub mod config;
pub mod infrastructure;
pub mod models;
pub mod services;

use crate::config::AppConfig;
use crate::services::file_service::FileService;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Headroom above the file size limit for multipart boundaries and headers.
pub const MULTIPART_OVERHEAD: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::health::env_test,
        api::handlers::files::list::list_files,
        api::handlers::files::upload::upload_file,
        api::handlers::files::manage::delete_file,
    ),
    components(
        schemas(
            config::ConfigStatus,
            models::StoredFile,
            models::UploadResult,
            api::handlers::health::EnvTestResponse,
            api::handlers::files::ListFilesResponse,
            api::handlers::files::UploadResponse,
            api::handlers::files::UploadForm,
            api::handlers::files::DeleteResponse,
            api::handlers::files::ErrorResponse,
        )
    ),
    tags(
        (name = "files", description = "File management endpoints"),
        (name = "system", description = "Configuration diagnostics")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub file_service: Arc<FileService>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(api::handlers::ui::index))
        .route("/api/env-test", get(api::handlers::health::env_test))
        .route("/api/files", get(api::handlers::files::list_files))
        .route("/api/files/*key", delete(api::handlers::files::delete_file))
        .route(
            "/api/upload",
            post(api::handlers::files::upload_file).layer(DefaultBodyLimit::max(
                state.config.max_file_size.saturating_add(MULTIPART_OVERHEAD),
            )),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
