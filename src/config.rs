use std::{env, fmt, str::FromStr};

use crate::models::{MessageFormat, PayloadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputMode {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputMode::Text),
            "json" => Ok(OutputMode::Json),
            other => Err(PayloadError::UnknownOutput(other.to_string())),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputMode::Text => write!(f, "text"),
            OutputMode::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_level: String,
    pub default_format: MessageFormat,
    pub output: OutputMode,
    pub binary_grouped: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            default_format: MessageFormat::Numeric,
            output: OutputMode::Text,
            binary_grouped: true,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment (after `.env` has been
    /// loaded by the caller).
    pub fn load() -> Result<Self, PayloadError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, PayloadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);

        let default_format = match lookup("PAYLOAD_DEFAULT_FORMAT") {
            Some(value) => value
                .parse::<MessageFormat>()
                .map_err(|e| PayloadError::Config(format!("PAYLOAD_DEFAULT_FORMAT: {}", e)))?,
            None => defaults.default_format,
        };

        let output = match lookup("PAYLOAD_OUTPUT") {
            Some(value) => value
                .parse::<OutputMode>()
                .map_err(|e| PayloadError::Config(format!("PAYLOAD_OUTPUT: {}", e)))?,
            None => defaults.output,
        };

        let binary_grouped = match lookup("PAYLOAD_BINARY_GROUPED") {
            Some(value) => parse_bool("PAYLOAD_BINARY_GROUPED", &value)?,
            None => defaults.binary_grouped,
        };

        Ok(Settings {
            log_level,
            default_format,
            output,
            binary_grouped,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, PayloadError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(PayloadError::Config(format!("{} must be true or false, got {}", name, other))),
    }
}
