use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug)]
pub(crate) enum RouteError {
    MissingConfig(&'static str),
    BadRequest(String),
    PayloadTooLarge(String),
    Upstream(sarvam::Error),
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::MissingConfig(m) => {
                tracing::error!(detail = m, "route_error_missing_config");
                (StatusCode::INTERNAL_SERVER_ERROR, m.to_string())
            }
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            Self::PayloadTooLarge(m) => (StatusCode::PAYLOAD_TOO_LARGE, m),
            Self::Upstream(e) => {
                let detail = format!("Transcription failed: {e}");
                tracing::error!(error = %e, debug = ?e, "transcription_failed");
                sentry::capture_message(&detail, sentry::Level::Error);
                (StatusCode::INTERNAL_SERVER_ERROR, detail)
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
