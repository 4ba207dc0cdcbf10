use crate::models::{MessageFormat, Normalized, Payload, RawInput, PAYLOAD_LEN};
use crate::utils::conversions::parse_numeric_list;

const BINARY_BITS: usize = PAYLOAD_LEN * 8;

/// Normalizes a raw message in the given format into a 5-byte payload.
///
/// Never fails: invalid input yields a zeroed payload together with the
/// human-readable validation errors. A comma-separated string is accepted
/// for the numeric format; a numeric sequence handed to the text or binary
/// format is rejected with a single error.
pub fn normalize(format: MessageFormat, raw: &RawInput) -> Normalized {
    log::debug!("Normalizing {} message", format);

    let normalized = match (format, raw) {
        (MessageFormat::Numeric, RawInput::Values(values)) => normalize_numeric(values),
        (MessageFormat::Numeric, RawInput::Text(text)) => normalize_numeric(&parse_numeric_list(text)),
        (MessageFormat::Text, RawInput::Text(text)) => normalize_text(text),
        (MessageFormat::Binary, RawInput::Text(text)) => normalize_binary(text),
        (MessageFormat::Text, RawInput::Values(_)) | (MessageFormat::Binary, RawInput::Values(_)) => {
            let label = if format == MessageFormat::Text { "Text" } else { "Binary" };
            Normalized::invalid(
                Payload::zeroed(format, raw.clone()),
                vec![format!("{} message must be a string", label)],
            )
        }
    };

    if !normalized.is_valid() {
        log::debug!("{} message failed validation with {} error(s)", format, normalized.errors.len());
    }
    log::trace!("Normalized payload: {:?}", normalized.payload.bytes);

    normalized
}

pub fn normalize_numeric(values: &[f64]) -> Normalized {
    let original = RawInput::Values(values.to_vec());

    if values.len() != PAYLOAD_LEN {
        return Normalized::invalid(
            Payload::zeroed(MessageFormat::Numeric, original),
            vec![format!("Must have exactly {} values", PAYLOAD_LEN)],
        );
    }

    // Every position is reported, one rule per position.
    let errors: Vec<String> = values
        .iter()
        .enumerate()
        .filter_map(|(idx, &val)| {
            let position = idx + 1;
            if val.is_nan() {
                Some(format!("Value {} must be a number", position))
            } else if !(0.0..=255.0).contains(&val) {
                Some(format!("Value {} must be between 0 and 255", position))
            } else if val.fract() != 0.0 {
                Some(format!("Value {} must be an integer", position))
            } else {
                None
            }
        })
        .collect();

    if !errors.is_empty() {
        return Normalized::invalid(Payload::zeroed(MessageFormat::Numeric, original), errors);
    }

    let mut bytes = [0u8; PAYLOAD_LEN];
    for (byte, &val) in bytes.iter_mut().zip(values) {
        *byte = val as u8;
    }

    Normalized::valid(Payload::new(MessageFormat::Numeric, bytes, original))
}

/// Maps up to five UTF-16 code units onto their values modulo 256,
/// zero-padding the rest. Characters outside the BMP take two units.
pub fn normalize_text(text: &str) -> Normalized {
    let units = leading_units(text);

    let mut bytes = [0u8; PAYLOAD_LEN];
    for (byte, unit) in bytes.iter_mut().zip(&units) {
        *byte = (unit % 256) as u8;
    }

    let truncated = String::from_utf16_lossy(&units);
    Normalized::valid(Payload::new(MessageFormat::Text, bytes, RawInput::Text(truncated)))
}

pub fn normalize_binary(binary: &str) -> Normalized {
    let original = RawInput::Text(binary.to_string());
    let clean: String = binary.chars().filter(|c| !c.is_whitespace()).collect();

    if clean.is_empty() {
        return Normalized::valid(Payload::zeroed(MessageFormat::Binary, original));
    }

    if !clean.chars().all(|c| c == '0' || c == '1') {
        return Normalized::invalid(
            Payload::zeroed(MessageFormat::Binary, original),
            vec!["Binary string must contain only 0s and 1s".to_string()],
        );
    }

    // Only ASCII digits remain, so byte length equals character count.
    if clean.len() != BINARY_BITS {
        return Normalized::invalid(
            Payload::zeroed(MessageFormat::Binary, original),
            vec![format!(
                "Binary string must be exactly {} bits (currently {})",
                BINARY_BITS,
                clean.len()
            )],
        );
    }

    let mut bytes = [0u8; PAYLOAD_LEN];
    for (byte, group) in bytes.iter_mut().zip(clean.as_bytes().chunks(8)) {
        *byte = group.iter().fold(0u8, |acc, bit| (acc << 1) | (bit - b'0'));
    }

    Normalized::valid(Payload::new(MessageFormat::Binary, bytes, original))
}

/// First five UTF-16 code units of `text`. A surrogate pair cut in half
/// leaves U+FFFD in its place.
pub fn truncate_text(text: &str) -> String {
    String::from_utf16_lossy(&leading_units(text))
}

fn leading_units(text: &str) -> Vec<u16> {
    text.encode_utf16().take(PAYLOAD_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(values: &[f64]) -> Normalized {
        normalize(MessageFormat::Numeric, &RawInput::from(values))
    }

    fn text(input: &str) -> Normalized {
        normalize(MessageFormat::Text, &RawInput::from(input))
    }

    fn binary(input: &str) -> Normalized {
        normalize(MessageFormat::Binary, &RawInput::from(input))
    }

    #[test]
    fn test_valid_numeric_is_identity() {
        let result = numeric(&[100.0, 150.0, 200.0, 50.0, 75.0]);
        assert!(result.is_valid());
        assert_eq!(result.bytes(), [100, 150, 200, 50, 75]);
        assert_eq!(result.payload.format, MessageFormat::Numeric);
        assert_eq!(
            result.payload.original_input,
            RawInput::Values(vec![100.0, 150.0, 200.0, 50.0, 75.0])
        );

        let edges = numeric(&[0.0, 255.0, 0.0, 255.0, 1.0]);
        assert!(edges.is_valid());
        assert_eq!(edges.bytes(), [0, 255, 0, 255, 1]);
    }

    #[test]
    fn test_numeric_wrong_length() {
        for values in [vec![], vec![1.0, 2.0, 3.0], vec![1.0; 6]] {
            let result = numeric(&values);
            assert_eq!(result.errors, vec!["Must have exactly 5 values".to_string()]);
            assert_eq!(result.bytes(), [0; 5]);
        }
    }

    #[test]
    fn test_numeric_reports_every_bad_position() {
        let result = numeric(&[f64::NAN, 10.0, 300.0, 3.5, -1.0]);
        assert_eq!(
            result.errors,
            vec![
                "Value 1 must be a number".to_string(),
                "Value 3 must be between 0 and 255".to_string(),
                "Value 4 must be an integer".to_string(),
                "Value 5 must be between 0 and 255".to_string(),
            ]
        );
    }

    #[test]
    fn test_numeric_one_error_per_position() {
        // Out of range and fractional: only the range rule is reported.
        let result = numeric(&[255.5, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(result.errors, vec!["Value 1 must be between 0 and 255".to_string()]);

        let result = numeric(&[f64::INFINITY, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(result.errors, vec!["Value 1 must be between 0 and 255".to_string()]);
    }

    #[test]
    fn test_failures_zero_bytes_and_keep_raw_input() {
        let raw = vec![1.0, 2.0, 999.0, 4.0, 5.0];
        let result = numeric(&raw);
        assert!(!result.is_valid());
        assert_eq!(result.bytes(), [0; 5]);
        assert_eq!(result.payload.original_input, RawInput::Values(raw));

        let result = binary("0000000100000002");
        assert!(!result.is_valid());
        assert_eq!(result.bytes(), [0; 5]);
        assert_eq!(result.payload.original_input, RawInput::Text("0000000100000002".to_string()));
    }

    #[test]
    fn test_numeric_from_comma_list() {
        let result = normalize(MessageFormat::Numeric, &RawInput::from("1, 2,3 ,4,5"));
        assert!(result.is_valid());
        assert_eq!(result.bytes(), [1, 2, 3, 4, 5]);

        let result = normalize(MessageFormat::Numeric, &RawInput::from("1,x,3,4,5"));
        assert_eq!(result.errors, vec!["Value 2 must be a number".to_string()]);
    }

    #[test]
    fn test_text_char_codes() {
        let result = text("hello");
        assert!(result.is_valid());
        assert_eq!(result.bytes(), [104, 101, 108, 108, 111]);

        let result = text("hi");
        assert_eq!(result.bytes(), [104, 105, 0, 0, 0]);

        let result = text("");
        assert!(result.is_valid());
        assert_eq!(result.bytes(), [0; 5]);
    }

    #[test]
    fn test_text_truncates_to_five_chars() {
        let result = text("hello world");
        assert!(result.is_valid());
        assert_eq!(result.bytes(), [104, 101, 108, 108, 111]);
        assert_eq!(result.payload.original_input, RawInput::Text("hello".to_string()));
    }

    #[test]
    fn test_text_codes_wrap_modulo_256() {
        // U+0101 and U+20AC wrap to their low byte.
        let result = text("\u{0101}\u{20AC}a");
        assert!(result.is_valid());
        assert_eq!(result.bytes(), [0x01, 0xAC, 97, 0, 0]);
    }

    #[test]
    fn test_text_counts_utf16_units() {
        // U+1F600 is the surrogate pair D83D DE00.
        let result = text("a\u{1F600}bcd");
        assert!(result.is_valid());
        assert_eq!(result.bytes(), [97, 0x3D, 0x00, 98, 99]);
        assert_eq!(result.payload.original_input, RawInput::Text("a\u{1F600}bc".to_string()));
    }

    #[test]
    fn test_text_split_surrogate_pair() {
        let result = text("abcd\u{1F600}");
        assert_eq!(result.bytes(), [97, 98, 99, 100, 0x3D]);
        assert_eq!(result.payload.original_input, RawInput::Text("abcd\u{FFFD}".to_string()));
        assert_eq!(truncate_text("abcd\u{1F600}"), "abcd\u{FFFD}");
    }

    #[test]
    fn test_binary_empty_is_valid() {
        for input in ["", "   ", "\n\t "] {
            let result = binary(input);
            assert!(result.is_valid());
            assert_eq!(result.bytes(), [0; 5]);
        }
    }

    #[test]
    fn test_binary_rejects_non_binary_chars() {
        let result = binary("0000000000000000000000000000000000000002");
        assert_eq!(result.bytes(), [0; 5]);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("only 0s and 1s"));
    }

    #[test]
    fn test_binary_wrong_length() {
        let result = binary("0101");
        assert_eq!(result.bytes(), [0; 5]);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("40"));
        assert!(result.errors[0].contains("(currently 4)"));

        let result = binary("00000001010000001100000100000001010000100");
        assert_eq!(result.bytes(), [0; 5]);
        assert_eq!(
            result.errors,
            vec!["Binary string must be exactly 40 bits (currently 41)".to_string()]
        );
    }

    #[test]
    fn test_binary_valid_groups() {
        let result = binary(&"00000001".repeat(5));
        assert!(result.is_valid());
        assert_eq!(result.bytes(), [1, 1, 1, 1, 1]);

        let result = binary("00000001 00000010\n00000011\t00000100 00000101");
        assert!(result.is_valid());
        assert_eq!(result.bytes(), [1, 2, 3, 4, 5]);

        let result = binary("0000000101000000110000010000000101000010");
        assert!(result.is_valid());
        assert_eq!(result.bytes(), [1, 64, 193, 1, 66]);

        let result = binary(&"1".repeat(40));
        assert_eq!(result.bytes(), [255; 5]);

        let result = binary(&format!("{}{}", "10101010".repeat(2), "01010101".repeat(3)));
        assert_eq!(result.bytes(), [170, 170, 85, 85, 85]);
    }

    #[test]
    fn test_binary_keeps_raw_input() {
        let raw = " 00000001 00000001 00000001 00000001 00000001 ";
        let result = binary(raw);
        assert_eq!(result.payload.original_input, RawInput::Text(raw.to_string()));

        let bad = "01 2";
        let result = binary(bad);
        assert_eq!(result.payload.original_input, RawInput::Text(bad.to_string()));
    }

    #[test]
    fn test_string_formats_reject_values() {
        let result = normalize(MessageFormat::Binary, &RawInput::from(vec![1.0; 5]));
        assert_eq!(result.errors, vec!["Binary message must be a string".to_string()]);
        assert_eq!(result.bytes(), [0; 5]);

        let result = normalize(MessageFormat::Text, &RawInput::from(vec![1.0; 5]));
        assert_eq!(result.errors, vec!["Text message must be a string".to_string()]);
    }

    #[test]
    fn test_original_input_round_trips() {
        let cases = vec![
            (MessageFormat::Numeric, RawInput::from(vec![9.0, 8.0, 7.0, 6.0, 5.0])),
            (MessageFormat::Numeric, RawInput::from(vec![1.5, 2.0])),
            (MessageFormat::Text, RawInput::from("watermark")),
            (MessageFormat::Text, RawInput::from("ab")),
            (MessageFormat::Text, RawInput::from("a\u{1F600}bcd")),
            (MessageFormat::Binary, RawInput::from("0000000100000010000000110000010000000101")),
            (MessageFormat::Binary, RawInput::from("01x")),
            (MessageFormat::Binary, RawInput::from("")),
        ];

        for (format, raw) in cases {
            let first = normalize(format, &raw);
            let second = normalize(format, &first.payload.original_input);
            assert_eq!(first.bytes(), second.bytes(), "{} {:?}", format, raw);
            assert_eq!(first.errors, second.errors, "{} {:?}", format, raw);
        }
    }
}
