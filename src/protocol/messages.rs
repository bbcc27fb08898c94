//! Streaming protocol messages
//!
//! The streaming channel carries JSON text frames in both directions. Outbound
//! there is a single command (`start_session`); inbound frames are a closed
//! set of typed messages dispatched on a `type` discriminator.
//!
//! Decoding is total: a syntactically invalid frame, or a recognized `type`
//! with required fields missing, becomes [`StreamMessage::Unknown`] with
//! `parse_error` set instead of an error. A single malformed frame must never
//! terminate the channel.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// ============================================================================
// Outbound command
// ============================================================================

/// The `start_session` command sent once per streaming channel
#[derive(Debug, Clone, Serialize)]
pub struct StartCommand {
    /// Project path the session should run in
    pub project_path: String,

    /// Initial prompt
    pub prompt: String,

    /// Model to run the session with
    pub model: String,

    /// Continue the previous conversation in this project
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub continue_conversation: bool,

    /// Resume a specific earlier session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl StartCommand {
    /// Create a start command for a fresh session
    pub fn new(
        project_path: impl Into<String>,
        prompt: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            project_path: project_path.into(),
            prompt: prompt.into(),
            model: model.into(),
            continue_conversation: false,
            session_id: None,
        }
    }

    /// Continue the most recent conversation in the project
    pub fn with_continue_conversation(mut self) -> Self {
        self.continue_conversation = true;
        self
    }

    /// Resume a specific earlier session
    pub fn with_resume(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Encode as the wire command `{"type":"start_session","data":{...}}`
    pub fn encode(&self) -> String {
        json!({
            "type": "start_session",
            "data": self,
        })
        .to_string()
    }
}

// ============================================================================
// Inbound messages
// ============================================================================

/// A typed inbound frame from the streaming channel
///
/// Every frame belongs to exactly one variant. `Unknown` covers unrecognized
/// `type` values as well as frames that failed to decode; both are non-fatal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum StreamMessage {
    /// The server accepted the start command and bound a session ID
    #[serde(rename = "session_started")]
    SessionStarted {
        /// ID of the session this channel now belongs to
        session_id: String,
    },

    /// One line of session output
    #[serde(rename = "session_output")]
    SessionOutput {
        /// Session the line belongs to
        session_id: String,
        /// The output line
        line: String,
    },

    /// The session finished; terminal
    #[serde(rename = "session_completed")]
    SessionCompleted {
        /// Status string as reported by the server
        status: String,
        /// Process exit code, if the server captured one
        #[serde(default)]
        exit_code: Option<i32>,
    },

    /// The session was cancelled; terminal
    #[serde(rename = "session_cancelled")]
    SessionCancelled,

    /// Server-side failure; terminal
    #[serde(rename = "error")]
    Error {
        /// Error description from the server
        message: String,
    },

    /// Anything the codec could not place in the variants above
    #[serde(skip)]
    Unknown {
        /// The raw frame text, kept for logging
        raw: String,
        /// True when the frame was malformed (bad JSON, or a recognized
        /// `type` missing required fields) rather than merely unrecognized
        parse_error: bool,
    },
}

impl StreamMessage {
    /// Whether this message ends channel consumption
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StreamMessage::SessionCompleted { .. }
                | StreamMessage::SessionCancelled
                | StreamMessage::Error { .. }
        )
    }
}

/// Known inbound `type` values
const KNOWN_TYPES: &[&str] = &[
    "session_started",
    "session_output",
    "session_completed",
    "session_cancelled",
    "error",
];

/// Decode one inbound text frame into a [`StreamMessage`]
///
/// Total over all inputs; see the module docs for the `Unknown` rules.
pub fn decode_frame(text: &str) -> StreamMessage {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("Dropping unparseable frame: {}", err);
            return StreamMessage::Unknown {
                raw: text.to_string(),
                parse_error: true,
            };
        }
    };

    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    if !KNOWN_TYPES.contains(&kind.as_str()) {
        tracing::debug!("Ignoring frame with unrecognized type {:?}", kind);
        return StreamMessage::Unknown {
            raw: text.to_string(),
            parse_error: false,
        };
    }

    match serde_json::from_value::<StreamMessage>(value) {
        Ok(message) => message,
        Err(err) => {
            tracing::warn!("Frame of type {:?} missing required fields: {}", kind, err);
            StreamMessage::Unknown {
                raw: text.to_string(),
                parse_error: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_start_command() {
        let encoded = StartCommand::new("/tmp/project", "hello", "test-model").encode();
        let value: Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(value["type"], "start_session");
        assert_eq!(value["data"]["project_path"], "/tmp/project");
        assert_eq!(value["data"]["prompt"], "hello");
        assert_eq!(value["data"]["model"], "test-model");
        // Optional knobs stay off the wire unless set
        assert!(value["data"].get("continue_conversation").is_none());
        assert!(value["data"].get("session_id").is_none());
    }

    #[test]
    fn test_encode_continue_and_resume() {
        let encoded = StartCommand::new("/p", "again", "m")
            .with_continue_conversation()
            .with_resume("old-session")
            .encode();
        let value: Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(value["data"]["continue_conversation"], true);
        assert_eq!(value["data"]["session_id"], "old-session");
    }

    #[test]
    fn test_decode_session_started() {
        let msg = decode_frame(r#"{"type":"session_started","session_id":"s1"}"#);
        assert_eq!(
            msg,
            StreamMessage::SessionStarted {
                session_id: "s1".into()
            }
        );
    }

    #[test]
    fn test_decode_session_output() {
        let msg = decode_frame(r#"{"type":"session_output","session_id":"s1","line":"hi"}"#);
        assert_eq!(
            msg,
            StreamMessage::SessionOutput {
                session_id: "s1".into(),
                line: "hi".into()
            }
        );
    }

    #[test]
    fn test_decode_completed_without_exit_code() {
        let msg = decode_frame(r#"{"type":"session_completed","status":"completed"}"#);
        assert_eq!(
            msg,
            StreamMessage::SessionCompleted {
                status: "completed".into(),
                exit_code: None
            }
        );
    }

    #[test]
    fn test_decode_cancelled_ignores_extra_fields() {
        // The server includes session_id; the variant carries nothing
        let msg = decode_frame(r#"{"type":"session_cancelled","session_id":"s1"}"#);
        assert_eq!(msg, StreamMessage::SessionCancelled);
        assert!(msg.is_terminal());
    }

    #[test]
    fn test_decode_unrecognized_type() {
        let msg = decode_frame(r#"{"type":"pong"}"#);
        assert_eq!(
            msg,
            StreamMessage::Unknown {
                raw: r#"{"type":"pong"}"#.into(),
                parse_error: false
            }
        );
        assert!(!msg.is_terminal());
    }

    #[test]
    fn test_decode_invalid_json() {
        let msg = decode_frame("{not json");
        match msg {
            StreamMessage::Unknown { parse_error, .. } => assert!(parse_error),
            other => panic!("expected Unknown, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_known_type_missing_fields() {
        // session_output without its line is a decode failure, not a fault
        let msg = decode_frame(r#"{"type":"session_output","session_id":"s1"}"#);
        match msg {
            StreamMessage::Unknown { parse_error, .. } => assert!(parse_error),
            other => panic!("expected Unknown, got {:?}", other),
        }
    }

    #[test]
    fn test_command_round_trips_through_value() {
        // What we put on the wire is what a server-side decoder would see
        let encoded = StartCommand::new("/p", "prompt text", "model-x").encode();
        let value: Value = serde_json::from_str(&encoded).unwrap();
        let data = &value["data"];
        assert_eq!(data["project_path"], "/p");
        assert_eq!(data["prompt"], "prompt text");
        assert_eq!(data["model"], "model-x");
    }
}
