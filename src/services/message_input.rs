use rand::Rng;

use crate::models::{MessageFormat, Normalized, PayloadError, RawInput, PAYLOAD_LEN};
use crate::utils::conversions::parse_numeric_list;
use crate::utils::payload_normalizer::{normalize, normalize_binary, normalize_numeric, normalize_text, truncate_text};

/// Input state owned by the message editor: the active format plus the raw
/// input held for each format. Switching formats never clears a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageInput {
    active: MessageFormat,
    numeric: Vec<f64>,
    text: String,
    binary: String,
}

impl Default for MessageInput {
    fn default() -> Self {
        Self::new(MessageFormat::default())
    }
}

impl MessageInput {
    pub fn new(initial_format: MessageFormat) -> Self {
        Self {
            active: initial_format,
            numeric: vec![0.0; PAYLOAD_LEN],
            text: String::new(),
            binary: String::new(),
        }
    }

    pub fn active_format(&self) -> MessageFormat {
        self.active
    }

    pub fn numeric_values(&self) -> &[f64] {
        &self.numeric
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Normalized value of the slot held for the active format.
    pub fn current(&self) -> Normalized {
        self.normalize_slot(self.active)
    }

    /// Updates one numeric field from its raw text. An empty field reads as 0;
    /// anything unparsable is kept as NaN and reported by validation.
    pub fn set_numeric_field(&mut self, index: usize, raw: &str) -> Result<Normalized, PayloadError> {
        if index >= self.numeric.len() {
            return Err(PayloadError::FieldIndex(index));
        }

        let raw = raw.trim();
        self.numeric[index] = if raw.is_empty() {
            0.0
        } else {
            raw.parse::<f64>().unwrap_or(f64::NAN)
        };

        Ok(normalize_numeric(&self.numeric))
    }

    pub fn set_numeric(&mut self, values: Vec<f64>) -> Normalized {
        self.numeric = values;
        normalize_numeric(&self.numeric)
    }

    /// Keeps at most the first five characters of `value`.
    pub fn set_text(&mut self, value: &str) -> Normalized {
        let normalized = normalize_text(value);
        self.text = truncate_text(value);
        normalized
    }

    pub fn set_binary(&mut self, value: &str) -> Normalized {
        self.binary = value.to_string();
        normalize_binary(&self.binary)
    }

    /// Stores `raw` in the slot for `format`. A numeric sequence given for a
    /// string format is reported without touching any slot.
    pub fn set_raw(&mut self, format: MessageFormat, raw: &RawInput) -> Normalized {
        match (format, raw) {
            (MessageFormat::Numeric, RawInput::Values(values)) => self.set_numeric(values.clone()),
            (MessageFormat::Numeric, RawInput::Text(text)) => self.set_numeric(parse_numeric_list(text)),
            (MessageFormat::Text, RawInput::Text(text)) => self.set_text(text),
            (MessageFormat::Binary, RawInput::Text(text)) => self.set_binary(text),
            (_, RawInput::Values(_)) => normalize(format, raw),
        }
    }

    pub fn switch_format(&mut self, format: MessageFormat) -> Normalized {
        log::debug!("Switching message format from {} to {}", self.active, format);
        self.active = format;
        self.current()
    }

    /// Fills the numeric slot with five random bytes and makes it active.
    pub fn generate_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Normalized {
        let normalized = generate_random(rng);
        self.numeric = normalized.bytes().iter().map(|b| f64::from(*b)).collect();
        self.active = MessageFormat::Numeric;
        normalized
    }

    fn normalize_slot(&self, format: MessageFormat) -> Normalized {
        match format {
            MessageFormat::Numeric => normalize_numeric(&self.numeric),
            MessageFormat::Text => normalize_text(&self.text),
            MessageFormat::Binary => normalize_binary(&self.binary),
        }
    }
}

/// Five independent uniform bytes as a valid numeric payload.
pub fn generate_random<R: Rng + ?Sized>(rng: &mut R) -> Normalized {
    log::debug!("Generating random numeric message");
    let values: Vec<f64> = (0..PAYLOAD_LEN).map(|_| f64::from(rng.gen::<u8>())).collect();
    normalize_numeric(&values)
}
