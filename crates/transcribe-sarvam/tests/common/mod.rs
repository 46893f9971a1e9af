#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hypr_api_env::SarvamEnv;
use sarvam::StreamingParams;
use sarvam::tungstenite;
use transcribe_sarvam::{
    BoxFuture, ProviderResponse, SttSession, SttUpstream, TranscribeConfig, router,
};

pub const TEST_API_KEY: &str = "sk_test_key";

pub async fn start_server(config: TranscribeConfig) -> SocketAddr {
    let app = router(config);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}

pub fn config_without_key() -> TranscribeConfig {
    TranscribeConfig::new(&SarvamEnv::default())
}

pub fn config_with_upstream(upstream: Arc<dyn SttUpstream>) -> TranscribeConfig {
    config_without_key()
        .with_api_key(TEST_API_KEY)
        .with_upstream(upstream)
}

#[derive(Clone)]
pub enum Script {
    Respond(serde_json::Value),
    FailConnect(&'static str),
    FailRecv(&'static str),
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub api_key: String,
    pub language_code: String,
    pub mode: String,
    pub high_vad_sensitivity: bool,
    pub audio_b64: Option<String>,
}

/// Scripted provider. Records every connect and counts released sessions.
#[derive(Clone)]
pub struct MockUpstream {
    script: Script,
    connects: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockUpstream {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            connects: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn responding(value: serde_json::Value) -> Self {
        Self::new(Script::Respond(value))
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn into_config(self) -> TranscribeConfig {
        config_with_upstream(Arc::new(self))
    }
}

fn transport_error(message: &'static str) -> sarvam::Error {
    sarvam::Error::Connect(tungstenite::Error::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionReset,
        message,
    )))
}

impl SttUpstream for MockUpstream {
    fn connect<'a>(
        &'a self,
        api_key: &'a str,
        params: &'a StreamingParams,
    ) -> BoxFuture<'a, Result<Box<dyn SttSession>, sarvam::Error>> {
        Box::pin(async move {
            self.connects.fetch_add(1, Ordering::SeqCst);

            let index = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(RecordedCall {
                    api_key: api_key.to_string(),
                    language_code: params.language_code.clone(),
                    mode: params.mode.to_string(),
                    high_vad_sensitivity: params.high_vad_sensitivity,
                    audio_b64: None,
                });
                calls.len() - 1
            };

            if let Script::FailConnect(message) = self.script {
                return Err(transport_error(message));
            }

            Ok(Box::new(MockSession {
                upstream: self.clone(),
                index,
            }) as Box<dyn SttSession>)
        })
    }
}

struct MockSession {
    upstream: MockUpstream,
    index: usize,
}

impl SttSession for MockSession {
    fn transcribe<'a>(&'a mut self, audio_b64: &'a str) -> BoxFuture<'a, Result<(), sarvam::Error>> {
        Box::pin(async move {
            self.upstream.calls.lock().unwrap()[self.index].audio_b64 = Some(audio_b64.to_string());
            Ok(())
        })
    }

    fn recv(&mut self) -> BoxFuture<'_, Result<ProviderResponse, sarvam::Error>> {
        Box::pin(async move {
            match &self.upstream.script {
                Script::Respond(value) => Ok(ProviderResponse::from_json(value.clone())),
                Script::FailConnect(message) | Script::FailRecv(message) => {
                    Err(sarvam::Error::Receive(tungstenite::Error::Io(
                        std::io::Error::new(std::io::ErrorKind::ConnectionReset, *message),
                    )))
                }
            }
        })
    }

    fn close(self: Box<Self>) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            self.upstream.closes.fetch_add(1, Ordering::SeqCst);
        })
    }
}

pub fn wav_part(bytes: Vec<u8>) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(bytes)
        .file_name("sample.wav")
        .mime_str("audio/wav")
        .unwrap()
}

pub async fn post_transcribe(
    addr: SocketAddr,
    form: reqwest::multipart::Form,
) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}/transcribe"))
        .multipart(form)
        .send()
        .await
        .unwrap()
}
