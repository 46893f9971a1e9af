pub(crate) mod error;
pub(crate) mod health;
pub(crate) mod root;
pub(crate) mod transcribe;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::config::TranscribeConfig;
use crate::upstream::SttUpstream;

pub(crate) use error::RouteError;
pub use health::HealthResponse;
pub use root::ServiceInfo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: TranscribeConfig,
    pub(crate) upstream: Arc<dyn SttUpstream>,
}

pub fn router(config: TranscribeConfig) -> Router {
    let max_upload_bytes = config.max_upload_bytes;
    let state = AppState {
        upstream: config.upstream(),
        config,
    };

    Router::new()
        .route("/", get(root::handler))
        .route("/health", get(health::handler))
        .route("/transcribe", post(transcribe::handler))
        .route("/openapi.json", get(openapi_json))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::openapi())
}
