//! Streaming session control

pub mod controller;

pub use controller::{StreamOutcome, StreamPhase, StreamingController};
