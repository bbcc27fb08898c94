//! Client configuration
//!
//! Endpoints and defaults for a [`crate::client::ClaudiaClient`]. Use the
//! builder pattern to override individual fields:
//!
//! ```ignore
//! let config = ClientConfig::default()
//!     .with_server_url("http://claudia.internal:3030")
//!     .with_default_model("claude-3-5-sonnet-20241022");
//! ```

use std::env;
use std::time::Duration;

/// Default REST endpoint of a locally running session server
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3030";

/// Default WebSocket endpoint of a locally running session server
pub const DEFAULT_WS_URL: &str = "ws://localhost:3030/ws";

/// Model used when a session request does not name one
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Configuration for a session server client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API (no trailing slash)
    pub server_url: String,

    /// URL of the streaming WebSocket endpoint
    pub ws_url: String,

    /// Model to use when callers do not specify one
    pub default_model: String,

    /// Timeout applied to each one-shot request (None = transport default)
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            ws_url: DEFAULT_WS_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration from environment variables
    ///
    /// Reads `CLAUDIA_SERVER_URL`, `CLAUDIA_WS_URL` and `CLAUDIA_MODEL`,
    /// falling back to the defaults for any that are unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("CLAUDIA_SERVER_URL") {
            config.server_url = url;
        }
        if let Ok(url) = env::var("CLAUDIA_WS_URL") {
            config.ws_url = url;
        }
        if let Ok(model) = env::var("CLAUDIA_MODEL") {
            config.default_model = model;
        }
        config
    }

    /// Set the REST API base URL
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    /// Set the streaming WebSocket URL
    pub fn with_ws_url(mut self, url: impl Into<String>) -> Self {
        self.ws_url = url.into();
        self
    }

    /// Set the default model
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the per-request timeout for one-shot operations
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.ws_url, DEFAULT_WS_URL);
        assert_eq!(config.default_model, DEFAULT_MODEL);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::default()
            .with_server_url("http://example:9999")
            .with_ws_url("ws://example:9999/ws")
            .with_default_model("test-model")
            .with_request_timeout(Duration::from_secs(5));

        assert_eq!(config.server_url, "http://example:9999");
        assert_eq!(config.ws_url, "ws://example:9999/ws");
        assert_eq!(config.default_model, "test-model");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }
}
