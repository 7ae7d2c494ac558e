use serde::Serialize;
use serde_json::{Map, Value};

/// `acodec` value the extractor uses for video-only streams.
pub const NO_CODEC: &str = "none";

/// One stream format as reported by the extractor.
///
/// Only `format_id`, `acodec` and `abr` are interpreted; every other field
/// is carried through untouched so the response mirrors the extractor output.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct AudioFormat(Map<String, Value>);

impl AudioFormat {
    /// Non-object entries are not formats and yield `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(AudioFormat(fields)),
            _ => None,
        }
    }

    pub fn format_id(&self) -> Option<&str> {
        self.0.get("format_id").and_then(Value::as_str)
    }

    pub fn acodec(&self) -> Option<&str> {
        self.0.get("acodec").and_then(Value::as_str)
    }

    /// Only the `"none"` sentinel marks a format as silent; a missing codec does not.
    pub fn has_audio(&self) -> bool {
        self.acodec() != Some(NO_CODEC)
    }

    pub fn abr(&self) -> Option<f64> {
        self.0.get("abr").and_then(Value::as_f64)
    }

    /// Bitrate used for ranking; absent counts as zero.
    pub fn ranking_bitrate(&self) -> f64 {
        self.abr().unwrap_or(0.0)
    }
}

#[derive(Clone, Debug)]
pub struct AudioRequest {
    pub input: String,
}

impl AudioRequest {
    /// Reads `{"input": "..."}` from a raw request body. Anything else,
    /// including an empty or non-string `input`, is rejected.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(body).ok()?;
        let input = value.as_object()?.get("input")?.as_str()?;
        if input.is_empty() {
            return None;
        }
        Some(AudioRequest {
            input: input.to_string(),
        })
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            details: None,
        }
    }

    pub fn with_details(error: &str, details: String) -> Self {
        ErrorResponse {
            error: error.to_string(),
            details: Some(details),
        }
    }
}
