use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::transcribe::handler,
        crate::routes::health::handler,
        crate::routes::root::handler,
    ),
    components(schemas(
        crate::routes::transcribe::TranscribeForm,
        crate::normalize::TranscriptionResponse,
        crate::routes::health::HealthResponse,
        crate::routes::root::ServiceInfo,
        crate::routes::error::ErrorBody,
    )),
    tags((name = "stt", description = "Speech-to-text powered by Sarvam AI saaras:v3"))
)]
pub struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
