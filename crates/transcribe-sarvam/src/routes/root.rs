use std::collections::BTreeMap;

use axum::Json;
use serde::{Deserialize, Serialize};

pub const SERVICE_NAME: &str = "Sarvam Speech-to-Text Service";

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub model: String,
    pub endpoints: BTreeMap<String, String>,
}

#[utoipa::path(
    get,
    path = "/",
    operation_id = "service_info",
    responses(
        (status = 200, description = "Service metadata", body = ServiceInfo),
    ),
    tag = "stt",
)]
pub async fn handler() -> Json<ServiceInfo> {
    let endpoints = [
        ("POST /transcribe", "Transcribe audio file"),
        ("GET /health", "Health check"),
        ("GET /openapi.json", "OpenAPI document"),
    ]
    .into_iter()
    .map(|(route, description)| (route.to_string(), description.to_string()))
    .collect();

    Json(ServiceInfo {
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: crate::MODEL.to_string(),
        endpoints,
    })
}
