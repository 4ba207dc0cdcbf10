pub mod error;
pub mod message;

pub use error::{ErrorResponse, PayloadError};
pub use message::{MessageFormat, Normalized, Payload, RawInput, PAYLOAD_LEN};
