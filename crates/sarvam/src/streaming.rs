use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

use crate::types::{AudioMessage, AudioPayload, Parsed, parse_server_message};
use crate::{DEFAULT_ENCODING, DEFAULT_SAMPLE_RATE, Error, StreamingResponse};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct StreamingSession {
    ws: WsStream,
}

impl StreamingSession {
    pub(crate) fn new(ws: WsStream) -> Self {
        Self { ws }
    }

    /// Submits base64-encoded audio.
    pub async fn transcribe(&mut self, audio_b64: &str) -> Result<(), Error> {
        let message = AudioMessage {
            audio: AudioPayload {
                data: audio_b64,
                sample_rate: DEFAULT_SAMPLE_RATE,
                encoding: DEFAULT_ENCODING,
            },
        };
        let json = serde_json::to_string(&message)?;

        self.ws
            .send(Message::Text(json.into()))
            .await
            .map_err(Error::Send)
    }

    pub async fn transcribe_bytes(&mut self, audio: &[u8]) -> Result<(), Error> {
        use base64::Engine;
        let audio_b64 = base64::engine::general_purpose::STANDARD.encode(audio);
        self.transcribe(&audio_b64).await
    }

    /// Waits for the next transcript-bearing message. VAD events and control
    /// frames are skipped; an upstream `error` message becomes [`Error::Api`].
    pub async fn recv(&mut self) -> Result<StreamingResponse, Error> {
        while let Some(message) = self.ws.next().await {
            match message.map_err(Error::Receive)? {
                Message::Text(text) => match parse_server_message(&text) {
                    Parsed::Response(response) => return Ok(response),
                    Parsed::Error(error) => {
                        tracing::warn!(
                            error = %error.error,
                            code = ?error.code,
                            "sarvam_error_message"
                        );
                        return Err(Error::Api {
                            message: error.error,
                            code: error.code,
                        });
                    }
                    Parsed::Event => {}
                },
                Message::Close(frame) => {
                    tracing::debug!(frame = ?frame, "sarvam_stream_closed");
                    return Err(Error::Closed);
                }
                Message::Binary(bytes) => {
                    tracing::debug!(len = bytes.len(), "sarvam_binary_message_skipped");
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }

        Err(Error::Closed)
    }

    pub async fn close(mut self) {
        if let Err(e) = self.ws.close(None).await {
            tracing::debug!(error = %e, "sarvam_close_failed");
        }
    }
}
