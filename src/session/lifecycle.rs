//! Session lifecycle state machine
//!
//! The authoritative model of a session's observable status, fed by either
//! transport: one-shot snapshots enter via [`LifecycleState::from_snapshot`],
//! stream frames via [`LifecycleState::apply`]. Pure values, no I/O; `apply`
//! returns a new state rather than mutating, so readers and the streaming
//! controller never race.
//!
//! Transitions are monotonic toward a terminal status. Once terminal, `apply`
//! is a no-op, which makes duplicated or reordered terminal frames harmless.

use crate::protocol::StreamMessage;
use crate::session::SessionStatus;

/// Snapshot of a session's lifecycle as the client knows it
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleState {
    /// Session ID, once the server has bound one
    pub session_id: Option<String>,

    /// Current status
    pub status: SessionStatus,

    /// Exit code carried by a `session_completed` frame or snapshot
    pub exit_code: Option<i32>,

    /// Server error message, retained for reporting when status is failed
    pub error: Option<String>,
}

impl Default for LifecycleState {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleState {
    /// A fresh state for a session that has not been acknowledged yet
    pub fn new() -> Self {
        Self {
            session_id: None,
            status: SessionStatus::Pending,
            exit_code: None,
            error: None,
        }
    }

    /// Build a state from a one-shot fetch of the session object
    pub fn from_snapshot(status: SessionStatus, exit_code: Option<i32>) -> Self {
        Self {
            session_id: None,
            status,
            exit_code,
            error: None,
        }
    }

    /// Whether the state can no longer change
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Fold one stream message into the state, returning the successor state
    ///
    /// Total over all [`StreamMessage`] variants. Output and unknown frames
    /// leave the state unchanged; terminal frames latch it.
    #[must_use]
    pub fn apply(&self, message: &StreamMessage) -> LifecycleState {
        // Terminal states are latched; duplicate or late frames are no-ops.
        if self.is_terminal() {
            return self.clone();
        }

        let mut next = self.clone();
        match message {
            StreamMessage::SessionStarted { session_id } => {
                // Only the first ack binds the ID.
                if next.session_id.is_none() {
                    next.session_id = Some(session_id.clone());
                }
                next.status = SessionStatus::Running;
            }
            StreamMessage::SessionOutput { .. } => {
                // Output is a side channel, not a state transition.
            }
            StreamMessage::SessionCompleted { exit_code, .. } => {
                next.status = SessionStatus::Completed;
                next.exit_code = *exit_code;
            }
            StreamMessage::SessionCancelled => {
                next.status = SessionStatus::Cancelled;
            }
            StreamMessage::Error { message } => {
                next.status = SessionStatus::Failed;
                next.error = Some(message.clone());
            }
            StreamMessage::Unknown { .. } => {
                // Tolerated; logged where it was decoded.
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(id: &str) -> StreamMessage {
        StreamMessage::SessionStarted {
            session_id: id.into(),
        }
    }

    fn output(id: &str, line: &str) -> StreamMessage {
        StreamMessage::SessionOutput {
            session_id: id.into(),
            line: line.into(),
        }
    }

    fn completed(exit_code: Option<i32>) -> StreamMessage {
        StreamMessage::SessionCompleted {
            status: "completed".into(),
            exit_code,
        }
    }

    #[test]
    fn test_successful_run() {
        let state = LifecycleState::new();
        assert_eq!(state.status, SessionStatus::Pending);

        let state = state.apply(&started("s1"));
        assert_eq!(state.status, SessionStatus::Running);
        assert_eq!(state.session_id.as_deref(), Some("s1"));

        let state = state.apply(&output("s1", "hi"));
        assert_eq!(state.status, SessionStatus::Running);

        let state = state.apply(&completed(Some(0)));
        assert_eq!(state.status, SessionStatus::Completed);
        assert_eq!(state.exit_code, Some(0));
        assert!(state.is_terminal());
    }

    #[test]
    fn test_monotonic_never_backward() {
        let terminal = LifecycleState::new()
            .apply(&started("s1"))
            .apply(&completed(Some(0)));

        // A late session_started must not re-enter running
        let after = terminal.apply(&started("s2"));
        assert_eq!(after, terminal);
        assert_eq!(after.session_id.as_deref(), Some("s1"));
    }

    #[test]
    fn test_terminal_is_idempotent() {
        let cancelled = LifecycleState::new()
            .apply(&started("s2"))
            .apply(&StreamMessage::SessionCancelled);
        assert_eq!(cancelled.status, SessionStatus::Cancelled);

        let again = cancelled.apply(&StreamMessage::SessionCancelled);
        assert_eq!(again, cancelled);

        let other_terminal = cancelled.apply(&completed(Some(1)));
        assert_eq!(other_terminal, cancelled);
    }

    #[test]
    fn test_session_id_bound_once() {
        let state = LifecycleState::new().apply(&started("first"));
        let state = state.apply(&started("second"));
        assert_eq!(state.session_id.as_deref(), Some("first"));
    }

    #[test]
    fn test_error_records_message() {
        let state = LifecycleState::new()
            .apply(&started("s1"))
            .apply(&StreamMessage::Error {
                message: "boom".into(),
            });
        assert_eq!(state.status, SessionStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(state.is_terminal());
    }

    #[test]
    fn test_unknown_is_ignored() {
        let running = LifecycleState::new().apply(&started("s1"));
        let after = running.apply(&StreamMessage::Unknown {
            raw: "{not json".into(),
            parse_error: true,
        });
        assert_eq!(after, running);
    }

    #[test]
    fn test_from_snapshot() {
        let state = LifecycleState::from_snapshot(SessionStatus::Completed, Some(2));
        assert!(state.is_terminal());
        assert_eq!(state.exit_code, Some(2));

        // Snapshot of a live session still accepts stream transitions
        let live = LifecycleState::from_snapshot(SessionStatus::Running, None);
        let done = live.apply(&completed(Some(0)));
        assert_eq!(done.status, SessionStatus::Completed);
    }
}
