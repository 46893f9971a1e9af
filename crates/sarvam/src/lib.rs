mod client;
mod error;
mod streaming;
mod types;

pub use client::*;
pub use error::*;
pub use streaming::*;
pub use types::*;

pub use tokio_tungstenite::tungstenite;

pub const DEFAULT_API_BASE: &str = "wss://api.sarvam.ai";
pub const API_KEY_HEADER: &str = "Api-Subscription-Key";
pub const DEFAULT_MODEL: &str = "saaras:v3";
pub const AUTO_DETECT_LANGUAGE: &str = "unknown";
