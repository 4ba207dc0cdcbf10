use serde::Serialize;
use thiserror::Error;

use crate::models::MessageFormat;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error("Unknown message format: {0}. Must be one of numeric, text, binary")]
    UnknownFormat(String),

    #[error("Unknown output mode: {0}. Must be text or json")]
    UnknownOutput(String),

    #[error("Payload must have exactly 5 values, got {0}")]
    Length(usize),

    #[error("Value at position {position} must be between 0 and 255, got {value}")]
    Range { position: usize, value: i64 },

    #[error("Field index {0} is out of range (expected 0-4)")]
    FieldIndex(usize),

    #[error("Invalid {format} message: {}", .errors.join("; "))]
    Validation {
        format: MessageFormat,
        errors: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PayloadError {
    pub fn code(&self) -> &'static str {
        match self {
            PayloadError::UnknownFormat(_) => "UNKNOWN_FORMAT",
            PayloadError::UnknownOutput(_) => "UNKNOWN_OUTPUT",
            PayloadError::Length(_) => "LENGTH_ERROR",
            PayloadError::Range { .. } => "RANGE_ERROR",
            PayloadError::FieldIndex(_) => "FIELD_INDEX_ERROR",
            PayloadError::Validation { .. } => "VALIDATION_ERROR",
            PayloadError::Config(_) => "CONFIG_ERROR",
            PayloadError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let details = match self {
            PayloadError::Validation { errors, .. } if errors.len() > 1 => Some(format!("{} validation errors", errors.len())),
            _ => None,
        };

        ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
            details,
        }
    }
}
