use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use super::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub api_key_configured: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    operation_id = "health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse),
    ),
    tag = "stt",
)]
pub async fn handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model: crate::MODEL.to_string(),
        api_key_configured: state.config.api_key_configured(),
    })
}
