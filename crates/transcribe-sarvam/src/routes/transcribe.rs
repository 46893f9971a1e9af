use axum::{
    Json,
    body::Bytes,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use base64::Engine;
use sarvam::{Mode, StreamingParams};

use super::{AppState, RouteError};
use crate::normalize::{TranscriptionResponse, normalize};
use crate::upstream::transcribe_once;

const FILE_FIELD: &str = "file";
const LANGUAGE_FIELD: &str = "language";
const LOG_PREVIEW_CHARS: usize = 80;

pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "audio/wav",
    "audio/x-wav",
    "audio/mpeg",
    "audio/mp3",
    "audio/mp4",
    "audio/m4a",
    "audio/x-m4a",
    "audio/ogg",
    "audio/webm",
    "video/webm",
];

/// Multipart body accepted by `POST /transcribe`.
#[allow(dead_code)]
#[derive(utoipa::ToSchema)]
pub struct TranscribeForm {
    /// Audio file (wav, mp3, m4a, ogg, webm).
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// BCP-47 language code (e.g. `en-IN`, `hi-IN`). `unknown` auto-detects.
    #[schema(default = "unknown")]
    pub language: Option<String>,
}

struct Upload {
    audio: Bytes,
    content_type: Option<String>,
    language: Option<String>,
}

#[utoipa::path(
    post,
    path = "/transcribe",
    operation_id = "transcribe",
    request_body(content = TranscribeForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Transcript", body = TranscriptionResponse),
        (status = 400, description = "Empty or malformed upload", body = crate::routes::error::ErrorBody),
        (status = 413, description = "Upload over the configured limit", body = crate::routes::error::ErrorBody),
        (status = 500, description = "Missing credential or upstream failure", body = crate::routes::error::ErrorBody),
    ),
    tag = "stt",
)]
pub async fn handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResponse>, RouteError> {
    let api_key = state
        .config
        .api_key
        .as_deref()
        .ok_or(RouteError::MissingConfig("SARVAM_API_KEY is not configured"))?;

    let upload = read_upload(multipart.map_err(multipart_rejection)?).await?;

    if let Some(content_type) = upload.content_type.as_deref() {
        if !is_allowed_content_type(content_type) {
            tracing::warn!(content_type = %content_type, "unexpected_content_type_proceeding_anyway");
        }
    }

    if upload.audio.is_empty() {
        return Err(RouteError::BadRequest("Uploaded file is empty".into()));
    }

    let language = resolve_language(upload.language);
    let audio_b64 = base64::engine::general_purpose::STANDARD.encode(&upload.audio);

    tracing::info!(
        body_size_bytes = upload.audio.len(),
        language = %language,
        "transcription_request"
    );

    let params = StreamingParams::default()
        .with_mode(Mode::Transcribe)
        .with_language(language);

    let response = transcribe_once(state.upstream.as_ref(), api_key, &params, &audio_b64)
        .await
        .map_err(RouteError::Upstream)?;

    let result = normalize(&response);

    tracing::info!(
        transcript = %preview(&result.transcript),
        language_code = %result.language_code,
        "transcription_complete"
    );

    Ok(Json(result))
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, RouteError> {
    let mut audio = None;
    let mut content_type = None;
    let mut language = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                content_type = field.content_type().map(str::to_string);
                audio = Some(field.bytes().await.map_err(multipart_error)?);
            }
            Some(LANGUAGE_FIELD) => {
                language = Some(field.text().await.map_err(multipart_error)?);
            }
            other => {
                tracing::debug!(field = ?other, "ignoring_multipart_field");
            }
        }
    }

    let audio = audio.ok_or_else(|| RouteError::BadRequest("file field is required".into()))?;

    Ok(Upload {
        audio,
        content_type,
        language,
    })
}

fn multipart_error(e: MultipartError) -> RouteError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RouteError::PayloadTooLarge(e.body_text())
    } else {
        RouteError::BadRequest(format!("invalid multipart body: {}", e.body_text()))
    }
}

fn multipart_rejection(rejection: MultipartRejection) -> RouteError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RouteError::PayloadTooLarge(rejection.body_text())
    } else {
        RouteError::BadRequest(rejection.body_text())
    }
}

pub(crate) fn is_allowed_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ALLOWED_CONTENT_TYPES.contains(&essence.as_str())
}

fn resolve_language(language: Option<String>) -> String {
    language
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| crate::UNKNOWN_LANGUAGE.to_string())
}

fn preview(transcript: &str) -> String {
    transcript.chars().take(LOG_PREVIEW_CHARS).collect()
}
