//! Transport adapters
//!
//! Raw I/O only: one-shot HTTP requests and the persistent WebSocket channel.
//! Everything protocol-shaped lives a layer up.

pub mod http;
pub mod ws;

pub use http::{HttpTransport, RawResponse};
pub use ws::{StreamChannel, WsChannel};
