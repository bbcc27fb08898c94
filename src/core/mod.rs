//! Core types for the session client
//!
//! This module provides the fundamental types used throughout the crate:
//! - `ClientConfig` - Endpoints and defaults for a client instance
//! - `ClientError` / `ClientResult` - Error types

pub mod config;
pub mod error;

pub use config::{ClientConfig, DEFAULT_MODEL, DEFAULT_SERVER_URL, DEFAULT_WS_URL};
pub use error::{ClientError, ClientResult};
