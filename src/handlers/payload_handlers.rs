use rand::Rng;
use serde::Serialize;

use crate::config::{OutputMode, Settings};
use crate::models::{MessageFormat, Normalized, PayloadError, RawInput, PAYLOAD_LEN};
use crate::services::MessageInput;
use crate::utils::{bytes_to_binary, bytes_to_hex, bytes_to_text, parse_byte_list, validate_strict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConvertTarget {
    Text,
    Binary,
    Hex,
}

#[derive(Debug, Serialize)]
pub struct PayloadView<'a> {
    pub format: MessageFormat,
    pub bytes: [u8; PAYLOAD_LEN],
    pub hex: String,
    pub binary: String,
    pub original_input: &'a RawInput,
    pub valid: bool,
    pub errors: &'a [String],
}

impl<'a> PayloadView<'a> {
    pub fn new(normalized: &'a Normalized, grouped: bool) -> Self {
        let bytes = normalized.bytes();
        Self {
            format: normalized.payload.format,
            bytes,
            hex: bytes_to_hex(&bytes),
            binary: bytes_to_binary(&bytes, grouped),
            original_input: &normalized.payload.original_input,
            valid: normalized.is_valid(),
            errors: &normalized.errors,
        }
    }
}

#[derive(Debug, Serialize)]
struct ConversionView {
    bytes: [u8; PAYLOAD_LEN],
    target: &'static str,
    value: String,
}

/// Normalizes one message from the command line. With `strict`, validation
/// errors become a hard failure instead of being printed alongside the payload.
pub fn normalize_message(
    settings: &Settings,
    format: Option<MessageFormat>,
    message: &str,
    strict: bool,
) -> Result<String, PayloadError> {
    let format = format.unwrap_or(settings.default_format);
    log::info!("Normalizing message as {}", format);

    let raw = RawInput::from(message);
    if strict {
        validate_strict(format, &raw).map_err(|e| {
            log::warn!("{} message rejected: {}", format, e);
            e
        })?;
    }

    let mut input = MessageInput::new(format);
    let normalized = input.set_raw(format, &raw);

    render_payload(settings, &normalized)
}

pub fn random_message<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Result<String, PayloadError> {
    let mut input = MessageInput::new(settings.default_format);
    let normalized = input.generate_random(rng);
    log::info!("Generated random message");
    render_payload(settings, &normalized)
}

pub fn convert_bytes(settings: &Settings, target: ConvertTarget, bytes: &str) -> Result<String, PayloadError> {
    let bytes = parse_byte_list(bytes)?;

    let (name, value) = match target {
        ConvertTarget::Text => ("text", bytes_to_text(&bytes)),
        ConvertTarget::Binary => ("binary", bytes_to_binary(&bytes, settings.binary_grouped)),
        ConvertTarget::Hex => ("hex", bytes_to_hex(&bytes)),
    };
    log::info!("Converted payload to {}", name);

    match settings.output {
        OutputMode::Text => Ok(value),
        OutputMode::Json => to_json(&ConversionView {
            bytes,
            target: name,
            value,
        }),
    }
}

pub fn render_payload(settings: &Settings, normalized: &Normalized) -> Result<String, PayloadError> {
    let view = PayloadView::new(normalized, settings.binary_grouped);

    match settings.output {
        OutputMode::Json => to_json(&view),
        OutputMode::Text => {
            let bytes: Vec<String> = view.bytes.iter().map(|b| b.to_string()).collect();
            let mut lines = vec![
                format!("Format:  {}", view.format),
                format!("Bytes:   {}", bytes.join(" ")),
                format!("Hex:     {}", view.hex),
                format!("Binary:  {}", view.binary),
            ];

            if view.valid {
                lines.push("Status:  valid".to_string());
            } else {
                lines.push(format!("Status:  invalid ({} error(s))", view.errors.len()));
                lines.extend(view.errors.iter().map(|e| format!("  - {}", e)));
            }

            Ok(lines.join("\n"))
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, PayloadError> {
    serde_json::to_string_pretty(value).map_err(|e| PayloadError::Serialization(e.to_string()))
}
