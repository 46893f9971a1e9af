#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};

#[derive(Debug, Clone, Default)]
pub struct CapturedHandshake {
    pub uri: String,
    pub api_key: Option<String>,
}

#[derive(Clone, Default)]
pub struct MockUpstreamConfig {
    /// Frames sent, in order, after the first client text message arrives.
    pub replies: Vec<Message>,
}

impl MockUpstreamConfig {
    pub fn reply_text(mut self, text: impl Into<String>) -> Self {
        let text: String = text.into();
        self.replies.push(Message::Text(text.into()));
        self
    }

    pub fn reply(mut self, message: Message) -> Self {
        self.replies.push(message);
        self
    }
}

pub struct MockServerHandle {
    pub addr: SocketAddr,
    pub handshake: Arc<Mutex<Option<CapturedHandshake>>>,
    pub received: Arc<Mutex<Vec<String>>>,
}

impl MockServerHandle {
    pub fn api_base(&self) -> String {
        format!("ws://{}", self.addr)
    }

    pub fn handshake(&self) -> CapturedHandshake {
        self.handshake.lock().unwrap().clone().expect("no handshake")
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

pub async fn start_mock_server_with_config(config: MockUpstreamConfig) -> MockServerHandle {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handshake = Arc::new(Mutex::new(None));
    let received = Arc::new(Mutex::new(Vec::new()));

    let handshake_slot = handshake.clone();
    let received_log = received.clone();

    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };

        let callback = move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
            let api_key = req
                .headers()
                .get(sarvam::API_KEY_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            *handshake_slot.lock().unwrap() = Some(CapturedHandshake {
                uri: req.uri().to_string(),
                api_key,
            });
            Ok(resp)
        };

        let Ok(mut ws) = tokio_tungstenite::accept_hdr_async(stream, callback).await else {
            return;
        };

        while let Some(Ok(message)) = ws.next().await {
            match message {
                Message::Text(text) => {
                    received_log.lock().unwrap().push(text.to_string());
                    for reply in config.replies.iter().cloned() {
                        if ws.send(reply).await.is_err() {
                            return;
                        }
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    MockServerHandle {
        addr,
        handshake,
        received,
    }
}
