//! Client error types

use thiserror::Error;

/// Errors that can occur when talking to the session server
#[derive(Error, Debug)]
pub enum ClientError {
    /// Server answered a one-shot request with a non-2xx status.
    /// The raw body text is preserved so callers can branch on it.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Raw response body text
        body: String,
    },

    /// Connection-level failure on a one-shot request
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failed to open the streaming channel
    #[error("Failed to connect streaming channel: {0}")]
    Connect(String),

    /// I/O failure on an established streaming channel
    #[error("Streaming channel error: {0}")]
    Channel(String),

    /// Send attempted on a channel the remote side already closed
    #[error("Streaming channel closed")]
    ChannelClosed,

    /// A one-shot response body did not match the expected shape.
    /// Stream frames are never surfaced this way; a malformed frame
    /// decodes to `StreamMessage::Unknown` instead.
    #[error("Failed to decode {context}: {source}")]
    Decode {
        /// What was being decoded (e.g. "session object")
        context: String,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Create a decode error with context about what failed to decode
    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        ClientError::Decode {
            context: context.into(),
            source,
        }
    }

    /// The HTTP status code, if this error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = ClientError::Http {
            status: 404,
            body: "not found".into(),
        };
        assert_eq!(err.to_string(), "HTTP 404: not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_decode_error_context() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ClientError::decode("session object", source);
        assert!(err.to_string().starts_with("Failed to decode session object"));
        assert_eq!(err.status(), None);
    }
}
