use serde::Deserialize;

use hypr_api_env::{SarvamEnv, SentryEnv, ServerEnv, string_to_u64};

#[derive(Clone, Deserialize)]
pub struct Env {
    #[serde(flatten)]
    pub sarvam: SarvamEnv,
    #[serde(flatten)]
    pub server: ServerEnv,
    #[serde(flatten)]
    pub sentry: SentryEnv,
    #[serde(
        default = "default_max_upload_bytes",
        deserialize_with = "string_to_u64"
    )]
    pub max_upload_bytes: u64,
}

fn default_max_upload_bytes() -> u64 {
    hypr_transcribe_sarvam::DEFAULT_MAX_UPLOAD_BYTES as u64
}

impl Env {
    pub fn load() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
