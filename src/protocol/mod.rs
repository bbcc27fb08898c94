//! Streaming protocol codec
//!
//! Typed frames for the streaming channel plus the encode/decode functions.

pub mod messages;

pub use messages::{decode_frame, StartCommand, StreamMessage};
