//! Wire types for the session server's REST API
//!
//! These types deserialize the JSON bodies the server returns. The server is
//! the sole source of truth for session state; everything here is a read-only
//! projection fetched on demand and never cached across calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// ============================================================================
// Session status
// ============================================================================

/// Observable status of a session
///
/// The REST API spells statuses in PascalCase (`"Starting"`, `"Running"`, ...)
/// while the streaming surface uses lowercase; aliases accept both so the two
/// transports never disagree about the same session. `Terminated` (killed by
/// the server) is folded into `Failed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Session accepted but not yet producing output
    #[serde(alias = "Pending", alias = "Starting", alias = "starting")]
    Pending,
    /// Session is running and processing
    #[serde(alias = "Running")]
    Running,
    /// Session completed successfully
    #[serde(alias = "Completed")]
    Completed,
    /// Session was cancelled by the caller
    #[serde(alias = "Cancelled")]
    Cancelled,
    /// Session failed or was terminated by the server
    #[serde(alias = "Failed", alias = "Terminated", alias = "terminated")]
    Failed,
}

impl SessionStatus {
    /// Whether no further lifecycle progress can occur from this status
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionStatus::Completed | SessionStatus::Cancelled | SessionStatus::Failed
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Running => "running",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Session
// ============================================================================

/// A server-tracked session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque session ID
    pub id: String,

    /// Project path the session runs in (owned by the caller)
    pub project_path: String,

    /// Initial prompt
    pub prompt: String,

    /// Model the session targets
    pub model: String,

    /// Current status
    pub status: SessionStatus,

    /// Exit code, once the session has completed
    #[serde(default)]
    pub exit_code: Option<i32>,

    /// Process ID on the server, if running
    #[serde(default)]
    pub pid: Option<u32>,

    /// When the session started
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    /// When the session reached a terminal status
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    /// Upstream session ID reported by the agent itself, if any
    #[serde(default)]
    pub claude_session_id: Option<String>,

    /// Truncated output kept by the server for quick inspection
    #[serde(default)]
    pub output_preview: String,
}

/// Response body of `POST /api/sessions`
#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionResponse {
    /// ID of the newly started (or resumed) session
    pub session_id: String,
}

/// Response body of `DELETE /api/sessions/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct CancelAck {
    /// Human-readable confirmation from the server
    pub message: String,
}

/// Wrapper the server puts around `GET /api/sessions` results
#[derive(Debug, Deserialize)]
pub(crate) struct SessionList {
    pub sessions: Vec<Session>,
}

// ============================================================================
// Session output
// ============================================================================

/// Output of a session, fetched via `GET /api/sessions/{id}/output`
#[derive(Debug, Clone, Deserialize)]
pub struct SessionOutput {
    /// The output payload; shape depends on the requested format
    pub output: OutputPayload,

    /// Format tag echoed by the server ("json" or "text")
    #[serde(default)]
    pub format: Option<String>,

    /// Number of lines the payload covers
    #[serde(default)]
    pub line_count: Option<usize>,
}

/// Output payload, either one line per array element (json format)
/// or a single newline-joined string (text format)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OutputPayload {
    /// One entry per output line
    Lines(Vec<String>),
    /// All lines joined with newlines
    Text(String),
}

impl SessionOutput {
    /// The output as individual lines, regardless of the wire format
    pub fn lines(&self) -> Vec<&str> {
        match &self.output {
            OutputPayload::Lines(lines) => lines.iter().map(String::as_str).collect(),
            OutputPayload::Text(text) => text.lines().collect(),
        }
    }
}

// ============================================================================
// Server info / health
// ============================================================================

/// Server info from `GET /info`
///
/// The payload is open-shaped; well-known fields are typed and the rest is
/// kept verbatim in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfo {
    /// Service name, if reported
    #[serde(default)]
    pub service: Option<String>,

    /// Server version, if reported
    #[serde(default)]
    pub version: Option<String>,

    /// Everything else the server reports
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Health check response from `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    /// Health indicator (the server reports "healthy")
    pub status: String,

    /// Service name, if reported
    #[serde(default)]
    pub service: Option<String>,

    /// Server version, if reported
    #[serde(default)]
    pub version: Option<String>,

    /// Server-side timestamp, if reported
    #[serde(default)]
    pub timestamp: Option<String>,
}
