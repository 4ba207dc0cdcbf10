//! Watermark message payloads: turns a numeric, text or binary message into
//! the canonical 5-byte payload consumed by the watermark encoder.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use models::{MessageFormat, Normalized, Payload, PayloadError, RawInput, PAYLOAD_LEN};
pub use services::{generate_random, MessageInput};
pub use utils::normalize;
