use crate::AppState;
use crate::config::ConfigStatus;
use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct EnvTestResponse {
    /// "ok" when every value is present, "missing" otherwise.
    pub status: String,
    pub configured: ConfigStatus,
    pub timestamp: String,
}

/// Reports which R2 settings are present. Values are never echoed.
#[utoipa::path(
    get,
    path = "/api/env-test",
    responses(
        (status = 200, description = "Configuration presence report", body = EnvTestResponse)
    ),
    tag = "system"
)]
pub async fn env_test(State(state): State<AppState>) -> Json<EnvTestResponse> {
    let configured = state.config.r2.status();
    let status = if configured.all_configured() {
        "ok"
    } else {
        "missing"
    };

    Json(EnvTestResponse {
        status: status.to_string(),
        configured,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
