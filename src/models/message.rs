use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::error::PayloadError;

/// Number of bytes in every watermark payload (40 bits).
pub const PAYLOAD_LEN: usize = 5;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    #[default]
    Numeric,
    Text,
    Binary,
}

impl MessageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageFormat::Numeric => "numeric",
            MessageFormat::Text => "text",
            MessageFormat::Binary => "binary",
        }
    }
}

impl fmt::Display for MessageFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MessageFormat {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "numeric" => Ok(MessageFormat::Numeric),
            "text" => Ok(MessageFormat::Text),
            "binary" => Ok(MessageFormat::Binary),
            other => Err(PayloadError::UnknownFormat(other.to_string())),
        }
    }
}

/// Untransformed user input as handed over by the caller.
///
/// Numeric fields are kept as `f64` so that unparsable (NaN), fractional
/// and out-of-range entries survive until validation reports on them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawInput {
    Values(Vec<f64>),
    Text(String),
}

impl From<Vec<f64>> for RawInput {
    fn from(values: Vec<f64>) -> Self {
        RawInput::Values(values)
    }
}

impl From<&[f64]> for RawInput {
    fn from(values: &[f64]) -> Self {
        RawInput::Values(values.to_vec())
    }
}

impl From<String> for RawInput {
    fn from(text: String) -> Self {
        RawInput::Text(text)
    }
}

impl From<&str> for RawInput {
    fn from(text: &str) -> Self {
        RawInput::Text(text.to_string())
    }
}

/// Canonical watermark message. `bytes` is always a full, in-range payload;
/// failed validation leaves it zeroed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Payload {
    pub format: MessageFormat,
    pub bytes: [u8; PAYLOAD_LEN],
    pub original_input: RawInput,
}

impl Payload {
    pub fn new(format: MessageFormat, bytes: [u8; PAYLOAD_LEN], original_input: RawInput) -> Self {
        Self {
            format,
            bytes,
            original_input,
        }
    }

    pub fn zeroed(format: MessageFormat, original_input: RawInput) -> Self {
        Self::new(format, [0; PAYLOAD_LEN], original_input)
    }
}

/// Result of normalizing one input: the payload plus advisory errors.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Normalized {
    pub payload: Payload,
    pub errors: Vec<String>,
}

impl Normalized {
    pub fn valid(payload: Payload) -> Self {
        Self {
            payload,
            errors: Vec::new(),
        }
    }

    pub fn invalid(payload: Payload, errors: Vec<String>) -> Self {
        Self { payload, errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn bytes(&self) -> [u8; PAYLOAD_LEN] {
        self.payload.bytes
    }
}
