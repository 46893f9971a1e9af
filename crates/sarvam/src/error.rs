use tokio_tungstenite::tungstenite;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("connection failed: {0}")]
    Connect(#[source] tungstenite::Error),
    #[error("connection timed out after {0}ms")]
    ConnectTimeout(u128),
    #[error("failed to send audio: {0}")]
    Send(#[source] tungstenite::Error),
    #[error("failed to receive response: {0}")]
    Receive(#[source] tungstenite::Error),
    #[error("stream closed before a response was received")]
    Closed,
    #[error("sarvam error: {message}")]
    Api {
        message: String,
        code: Option<String>,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
