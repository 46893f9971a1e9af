use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use sarvam::{SarvamClient, StreamingParams, StreamingSession};

use crate::ProviderResponse;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Opens sessions against the speech-to-text provider.
pub trait SttUpstream: Send + Sync {
    fn connect<'a>(
        &'a self,
        api_key: &'a str,
        params: &'a StreamingParams,
    ) -> BoxFuture<'a, Result<Box<dyn SttSession>, sarvam::Error>>;
}

pub trait SttSession: Send {
    fn transcribe<'a>(&'a mut self, audio_b64: &'a str) -> BoxFuture<'a, Result<(), sarvam::Error>>;

    fn recv(&mut self) -> BoxFuture<'_, Result<ProviderResponse, sarvam::Error>>;

    fn close(self: Box<Self>) -> BoxFuture<'static, ()>;
}

/// Submits one audio payload and waits for exactly one response. The session
/// is closed on every path out of this function.
pub async fn transcribe_once(
    upstream: &dyn SttUpstream,
    api_key: &str,
    params: &StreamingParams,
    audio_b64: &str,
) -> Result<ProviderResponse, sarvam::Error> {
    let mut session = upstream.connect(api_key, params).await?;

    let result = async {
        session.transcribe(audio_b64).await?;
        session.recv().await
    }
    .await;

    session.close().await;
    result
}

#[derive(Debug, Clone)]
pub struct SarvamUpstream {
    api_base: String,
    connect_timeout: Duration,
}

impl SarvamUpstream {
    pub fn new(api_base: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            api_base: api_base.into(),
            connect_timeout,
        }
    }

    fn client(&self, api_key: &str) -> SarvamClient {
        SarvamClient::builder()
            .api_base(self.api_base.clone())
            .connect_timeout(self.connect_timeout)
            .api_key(api_key)
            .build()
    }
}

impl SttUpstream for SarvamUpstream {
    fn connect<'a>(
        &'a self,
        api_key: &'a str,
        params: &'a StreamingParams,
    ) -> BoxFuture<'a, Result<Box<dyn SttSession>, sarvam::Error>> {
        Box::pin(async move {
            let session = self.client(api_key).connect_streaming(params).await?;
            Ok(Box::new(SarvamSession(session)) as Box<dyn SttSession>)
        })
    }
}

struct SarvamSession(StreamingSession);

impl SttSession for SarvamSession {
    fn transcribe<'a>(&'a mut self, audio_b64: &'a str) -> BoxFuture<'a, Result<(), sarvam::Error>> {
        Box::pin(self.0.transcribe(audio_b64))
    }

    fn recv(&mut self) -> BoxFuture<'_, Result<ProviderResponse, sarvam::Error>> {
        Box::pin(async move { self.0.recv().await.map(ProviderResponse::from) })
    }

    fn close(self: Box<Self>) -> BoxFuture<'static, ()> {
        Box::pin(async move { self.0.close().await })
    }
}
