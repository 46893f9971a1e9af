use std::sync::Arc;
use std::time::Duration;

use hypr_api_env::SarvamEnv;

use crate::upstream::{SarvamUpstream, SttUpstream};

pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = sarvam::DEFAULT_CONNECT_TIMEOUT_MS;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Clone)]
pub struct TranscribeConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub connect_timeout: Duration,
    pub max_upload_bytes: usize,
    pub upstream: Option<Arc<dyn SttUpstream>>,
}

impl TranscribeConfig {
    pub fn new(env: &SarvamEnv) -> Self {
        Self {
            api_key: env.sarvam_api_key.clone(),
            api_base: env
                .sarvam_api_base
                .clone()
                .unwrap_or_else(|| sarvam::DEFAULT_API_BASE.to_string()),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            upstream: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    pub fn with_upstream(mut self, upstream: Arc<dyn SttUpstream>) -> Self {
        self.upstream = Some(upstream);
        self
    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn upstream(&self) -> Arc<dyn SttUpstream> {
        match &self.upstream {
            Some(upstream) => upstream.clone(),
            None => Arc::new(SarvamUpstream::new(
                self.api_base.clone(),
                self.connect_timeout,
            )),
        }
    }

    pub fn log_api_key_status(&self) {
        if self.api_key_configured() {
            tracing::info!(model = crate::MODEL, "sarvam_api_key_configured");
        } else {
            tracing::warn!("sarvam_api_key_missing_transcription_requests_will_fail");
        }
    }
}
