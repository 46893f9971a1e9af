use std::time::Duration;

use tokio_tungstenite::tungstenite::{ClientRequestBuilder, http::Uri};

use crate::{API_KEY_HEADER, DEFAULT_API_BASE, Error, StreamingParams, StreamingSession};

pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 7 * 1000;
const STREAMING_PATH: &str = "speech-to-text/ws";

pub struct NoApiKey;
pub struct WithApiKey {
    api_key: String,
}

pub struct SarvamClientBuilder<S = NoApiKey> {
    state: S,
    api_base: String,
    connect_timeout: Duration,
}

impl Default for SarvamClientBuilder<NoApiKey> {
    fn default() -> Self {
        Self {
            state: NoApiKey,
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
        }
    }
}

impl<S> SarvamClientBuilder<S> {
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

impl SarvamClientBuilder<NoApiKey> {
    pub fn api_key(self, api_key: impl Into<String>) -> SarvamClientBuilder<WithApiKey> {
        SarvamClientBuilder {
            state: WithApiKey {
                api_key: api_key.into(),
            },
            api_base: self.api_base,
            connect_timeout: self.connect_timeout,
        }
    }
}

impl SarvamClientBuilder<WithApiKey> {
    pub fn build(self) -> SarvamClient {
        SarvamClient {
            api_key: self.state.api_key,
            api_base: self.api_base,
            connect_timeout: self.connect_timeout,
        }
    }
}

#[derive(Clone)]
pub struct SarvamClient {
    api_key: String,
    api_base: String,
    connect_timeout: Duration,
}

impl std::fmt::Debug for SarvamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SarvamClient")
            .field("api_base", &self.api_base)
            .field("connect_timeout", &self.connect_timeout)
            .finish_non_exhaustive()
    }
}

impl SarvamClient {
    pub fn builder() -> SarvamClientBuilder {
        SarvamClientBuilder::default()
    }

    pub fn streaming_url(&self, params: &StreamingParams) -> Result<url::Url, Error> {
        let base = format!("{}/{}", self.api_base.trim_end_matches('/'), STREAMING_PATH);
        let mut url = url::Url::parse(&base).map_err(|e| Error::InvalidUrl(format!("{base}: {e}")))?;

        url.query_pairs_mut()
            .append_pair("model", &params.model)
            .append_pair("mode", params.mode.as_ref())
            .append_pair("language-code", &params.language_code)
            .append_pair(
                "high_vad_sensitivity",
                if params.high_vad_sensitivity {
                    "true"
                } else {
                    "false"
                },
            );

        Ok(url)
    }

    /// Opens a streaming session. The caller owns the session and must
    /// [`StreamingSession::close`] it; dropping it tears the socket down
    /// without a close handshake.
    pub async fn connect_streaming(
        &self,
        params: &StreamingParams,
    ) -> Result<StreamingSession, Error> {
        let url = self.streaming_url(params)?;
        let uri: Uri = url
            .as_str()
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("{e}")))?;

        let request = ClientRequestBuilder::new(uri).with_header(API_KEY_HEADER, &self.api_key);

        tracing::debug!(
            model = %params.model,
            mode = %params.mode,
            language_code = %params.language_code,
            "sarvam_streaming_connect"
        );

        let (ws, _) = tokio::time::timeout(
            self.connect_timeout,
            tokio_tungstenite::connect_async(request),
        )
        .await
        .map_err(|_| Error::ConnectTimeout(self.connect_timeout.as_millis()))?
        .map_err(Error::Connect)?;

        Ok(StreamingSession::new(ws))
    }
}
