pub mod payload_handlers;

pub use payload_handlers::*;
