use serde::{Deserialize, Serialize};

use crate::{AUTO_DETECT_LANGUAGE, DEFAULT_MODEL};

pub const DEFAULT_SAMPLE_RATE: u32 = 16000;
pub const DEFAULT_ENCODING: &str = "audio/wav";

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    #[default]
    Transcribe,
    Translate,
    Verbatim,
    Translit,
    Codemix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingParams {
    pub model: String,
    pub mode: Mode,
    pub language_code: String,
    pub high_vad_sensitivity: bool,
}

impl Default for StreamingParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            mode: Mode::Transcribe,
            language_code: AUTO_DETECT_LANGUAGE.to_string(),
            high_vad_sensitivity: true,
        }
    }
}

impl StreamingParams {
    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AudioMessage<'a> {
    pub audio: AudioPayload<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AudioPayload<'a> {
    pub data: &'a str,
    pub sample_rate: u32,
    pub encoding: &'a str,
}

/// Payload of a `type: "data"` message.
///
/// Every field is optional so older and newer server revisions both decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorData {
    #[serde(default, alias = "message")]
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub(crate) enum ServerMessage {
    Data(TranscriptionData),
    Error(ErrorData),
    Events(serde_json::Value),
}

/// A transcript-bearing message received from the streaming endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamingResponse {
    Data(TranscriptionData),
    /// Anything that did not decode as a known message; kept verbatim.
    Unrecognized(serde_json::Value),
}

pub(crate) enum Parsed {
    Response(StreamingResponse),
    Error(ErrorData),
    Event,
}

pub(crate) fn parse_server_message(raw: &str) -> Parsed {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(_) => {
            return Parsed::Response(StreamingResponse::Unrecognized(serde_json::Value::String(
                raw.to_string(),
            )));
        }
    };

    match serde_json::from_value::<ServerMessage>(value.clone()) {
        Ok(ServerMessage::Data(data)) => Parsed::Response(StreamingResponse::Data(data)),
        Ok(ServerMessage::Error(error)) => Parsed::Error(error),
        Ok(ServerMessage::Events(signal)) => {
            tracing::debug!(signal = %signal, "sarvam_event");
            Parsed::Event
        }
        Err(e) => {
            tracing::debug!(error = %e, "sarvam_message_unrecognized");
            Parsed::Response(StreamingResponse::Unrecognized(value))
        }
    }
}
