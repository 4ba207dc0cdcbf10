pub mod conversions;
pub mod payload_normalizer;

pub use conversions::{
    bytes_to_binary, bytes_to_hex, bytes_to_text, parse_byte_list, parse_numeric_list, validate_strict, values_to_bytes,
};
pub use payload_normalizer::{normalize, normalize_binary, normalize_numeric, normalize_text};
