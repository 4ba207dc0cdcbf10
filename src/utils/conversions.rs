use crate::models::{MessageFormat, PayloadError, RawInput, PAYLOAD_LEN};
use crate::utils::payload_normalizer::normalize;

/// Renders the payload as 40 binary digits, optionally one group per byte.
pub fn bytes_to_binary(bytes: &[u8; PAYLOAD_LEN], grouped: bool) -> String {
    let groups: Vec<String> = bytes.iter().map(|b| format!("{:08b}", b)).collect();
    if grouped {
        groups.join(" ")
    } else {
        groups.concat()
    }
}

/// Decodes the payload as UTF-8, dropping invalid sequences and trailing NULs.
pub fn bytes_to_text(bytes: &[u8; PAYLOAD_LEN]) -> String {
    let mut text = String::new();
    let mut rest: &[u8] = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                text.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                // Prefix is valid by construction.
                text.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match e.error_len() {
                    Some(len) => rest = &after[len..],
                    None => break,
                }
            }
        }
    }

    text.trim_end_matches('\0').to_string()
}

/// Uppercase hex pairs, one per byte, as shown in the payload preview.
pub fn bytes_to_hex(bytes: &[u8; PAYLOAD_LEN]) -> String {
    bytes
        .iter()
        .map(|b| hex::encode_upper([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a comma-separated list of numbers. Blank fields count as 0 and
/// unparsable fields become NaN so validation can point at them.
pub fn parse_numeric_list(input: &str) -> Vec<f64> {
    input
        .split(',')
        .map(|part| {
            let part = part.trim();
            if part.is_empty() {
                0.0
            } else {
                part.parse::<f64>().unwrap_or(f64::NAN)
            }
        })
        .collect()
}

/// Like [`normalize`], but turns advisory errors into a hard failure.
pub fn validate_strict(format: MessageFormat, raw: &RawInput) -> Result<[u8; PAYLOAD_LEN], PayloadError> {
    let normalized = normalize(format, raw);
    if normalized.is_valid() {
        Ok(normalized.bytes())
    } else {
        Err(PayloadError::Validation {
            format,
            errors: normalized.errors,
        })
    }
}

pub fn values_to_bytes(values: &[i64]) -> Result<[u8; PAYLOAD_LEN], PayloadError> {
    if values.len() != PAYLOAD_LEN {
        return Err(PayloadError::Length(values.len()));
    }

    let mut bytes = [0u8; PAYLOAD_LEN];
    for (idx, (byte, &value)) in bytes.iter_mut().zip(values).enumerate() {
        *byte = u8::try_from(value).map_err(|_| PayloadError::Range {
            position: idx + 1,
            value,
        })?;
    }
    Ok(bytes)
}

/// Parses a strict comma-separated byte list such as `"1,2,3,4,5"`.
pub fn parse_byte_list(input: &str) -> Result<[u8; PAYLOAD_LEN], PayloadError> {
    let mut values = Vec::new();
    let mut errors = Vec::new();

    for (idx, part) in input.split(',').enumerate() {
        match part.trim().parse::<i64>() {
            Ok(value) => values.push(value),
            Err(_) => errors.push(format!("Value {} must be an integer", idx + 1)),
        }
    }

    if !errors.is_empty() {
        return Err(PayloadError::Validation {
            format: MessageFormat::Numeric,
            errors,
        });
    }

    values_to_bytes(&values)
}
