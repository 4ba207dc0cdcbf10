mod message_input;

pub use message_input::{generate_random, MessageInput};
