//! Reduces whatever the provider sent back to a `{transcript, language_code}`
//! pair.
//!
//! The provider has shipped several response shapes over time, so decoding is
//! split in two: [`ProviderResponse`] classifies a response into one of the
//! known shapes, and [`extract_transcript`] / [`extract_language`] walk the
//! shapes in a fixed priority order. Neither step can fail.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::UNKNOWN_LANGUAGE;

const TRANSCRIPT_KEY: &str = "transcript";
const LANGUAGE_KEY: &str = "language_code";
const DATA_KEY: &str = "data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TranscriptionResponse {
    pub transcript: String,
    pub language_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TranscriptFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    /// Typed message with its payload under `data`; `outer` holds any fields
    /// the message also carries at the top level.
    NestedObject {
        data: TranscriptFields,
        outer: TranscriptFields,
    },
    FlatObject(TranscriptFields),
    /// Untyped mapping whose `data` entry is itself a mapping. `rest` is every
    /// other top-level entry.
    NestedMapping {
        data: Map<String, Value>,
        rest: Map<String, Value>,
    },
    FlatMapping(Map<String, Value>),
    Unknown(Value),
}

impl ProviderResponse {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(mut map) => match map.remove(DATA_KEY) {
                Some(Value::Object(data)) => Self::NestedMapping { data, rest: map },
                Some(other) => {
                    map.insert(DATA_KEY.to_string(), other);
                    Self::FlatMapping(map)
                }
                None => Self::FlatMapping(map),
            },
            other => Self::Unknown(other),
        }
    }

    /// String form of the whole response, used when no transcript is found.
    pub fn render(&self) -> String {
        match self {
            Self::NestedObject { data, outer } => {
                let mut map = fields_to_map(outer);
                map.insert(DATA_KEY.to_string(), Value::Object(fields_to_map(data)));
                Value::Object(map).to_string()
            }
            Self::FlatObject(fields) => Value::Object(fields_to_map(fields)).to_string(),
            Self::NestedMapping { data, rest } => {
                let mut map = rest.clone();
                map.insert(DATA_KEY.to_string(), Value::Object(data.clone()));
                Value::Object(map).to_string()
            }
            Self::FlatMapping(map) => Value::Object(map.clone()).to_string(),
            Self::Unknown(Value::String(s)) => s.clone(),
            Self::Unknown(other) => other.to_string(),
        }
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let pick = |fields: &TranscriptFields| match key {
            TRANSCRIPT_KEY => fields.transcript.clone(),
            LANGUAGE_KEY => fields.language_code.clone(),
            _ => None,
        };

        match self {
            Self::NestedObject { data, outer } => pick(data).or_else(|| pick(outer)),
            Self::FlatObject(fields) => pick(fields),
            Self::NestedMapping { data, rest } => {
                entry_as_string(data, key).or_else(|| entry_as_string(rest, key))
            }
            Self::FlatMapping(map) => entry_as_string(map, key),
            Self::Unknown(_) => None,
        }
    }
}

impl From<Value> for ProviderResponse {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl From<TranscriptFields> for ProviderResponse {
    fn from(fields: TranscriptFields) -> Self {
        Self::FlatObject(fields)
    }
}

impl From<sarvam::TranscriptionData> for ProviderResponse {
    fn from(data: sarvam::TranscriptionData) -> Self {
        Self::NestedObject {
            data: TranscriptFields {
                transcript: data.transcript,
                language_code: data.language_code,
            },
            outer: TranscriptFields::default(),
        }
    }
}

impl From<sarvam::StreamingResponse> for ProviderResponse {
    fn from(response: sarvam::StreamingResponse) -> Self {
        match response {
            sarvam::StreamingResponse::Data(data) => data.into(),
            sarvam::StreamingResponse::Unrecognized(value) => Self::from_json(value),
        }
    }
}

pub fn extract_transcript(response: &ProviderResponse) -> String {
    response
        .lookup(TRANSCRIPT_KEY)
        .unwrap_or_else(|| response.render())
}

pub fn extract_language(response: &ProviderResponse) -> String {
    response
        .lookup(LANGUAGE_KEY)
        .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string())
}

pub fn normalize(response: &ProviderResponse) -> TranscriptionResponse {
    TranscriptionResponse {
        transcript: extract_transcript(response),
        language_code: extract_language(response),
    }
}

// `null` counts as absent; other non-string values are kept as JSON text.
fn entry_as_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn fields_to_map(fields: &TranscriptFields) -> Map<String, Value> {
    let mut map = Map::new();
    if let Some(transcript) = &fields.transcript {
        map.insert(TRANSCRIPT_KEY.to_string(), Value::String(transcript.clone()));
    }
    if let Some(language_code) = &fields.language_code {
        map.insert(LANGUAGE_KEY.to_string(), Value::String(language_code.clone()));
    }
    map
}
