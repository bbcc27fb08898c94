//! Streaming session controller
//!
//! Drives one streaming session end to end over a [`StreamChannel`]: sends
//! the start command, consumes inbound frames in arrival order, folds each
//! one through the codec into the lifecycle model, and releases the channel
//! once a terminal message arrives or the transport fails.
//!
//! Termination conditions are explicit phases rather than ad-hoc breaks, so
//! each transition is testable in isolation from I/O.

use crate::core::ClientResult;
use crate::protocol::{decode_frame, StartCommand, StreamMessage};
use crate::session::LifecycleState;
use crate::transport::StreamChannel;

/// Phase of a streaming session
///
/// ```text
/// Connecting -> AwaitingStartAck -> Streaming -> Closed
///                      \________________________/
///                 (terminal frame, channel error, remote close)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    /// Channel open, start command not yet sent
    Connecting,
    /// Start command sent, waiting for `session_started`
    AwaitingStartAck,
    /// Session acknowledged, consuming output
    Streaming,
    /// Channel released; no further frames are processed
    Closed,
}

/// Final result of one streaming session
#[derive(Debug, Clone)]
pub struct StreamOutcome {
    /// The bound session ID. Absent when the channel closed before any
    /// `session_started` arrived, which is a valid non-error outcome.
    pub session_id: Option<String>,

    /// Lifecycle state as of the last processed frame
    pub state: LifecycleState,
}

/// Controller owning one streaming channel for the duration of one session
pub struct StreamingController<C: StreamChannel> {
    channel: C,
    phase: StreamPhase,
    state: LifecycleState,
}

impl<C: StreamChannel> StreamingController<C> {
    /// Wrap a freshly opened channel
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            phase: StreamPhase::Connecting,
            state: LifecycleState::new(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    /// Run the session to completion
    ///
    /// `on_line` receives each `session_output` line as `(session_id, line)`.
    /// The channel is released on every exit path, including errors.
    pub async fn run(
        mut self,
        command: &StartCommand,
        mut on_line: impl FnMut(&str, &str),
    ) -> ClientResult<StreamOutcome> {
        let result = self.drive(command, &mut on_line).await;

        if let Err(e) = self.channel.close().await {
            tracing::debug!("Error releasing streaming channel: {}", e);
        }
        self.phase = StreamPhase::Closed;

        result.map(|()| StreamOutcome {
            session_id: self.state.session_id.clone(),
            state: self.state,
        })
    }

    async fn drive(
        &mut self,
        command: &StartCommand,
        on_line: &mut impl FnMut(&str, &str),
    ) -> ClientResult<()> {
        self.channel.send(command.encode()).await?;
        self.phase = StreamPhase::AwaitingStartAck;

        while self.phase != StreamPhase::Closed {
            let frame = match self.channel.next_frame().await? {
                Some(frame) => frame,
                None => {
                    // Remote close before a terminal frame still ends the
                    // session; the caller sees whatever state was reached.
                    tracing::info!("Streaming channel closed by remote");
                    self.phase = StreamPhase::Closed;
                    break;
                }
            };

            let message = decode_frame(&frame);
            self.state = self.state.apply(&message);

            match &message {
                StreamMessage::SessionStarted { session_id } => {
                    tracing::info!("Streaming session started: {}", session_id);
                    if self.phase == StreamPhase::AwaitingStartAck {
                        self.phase = StreamPhase::Streaming;
                    }
                }
                StreamMessage::SessionOutput { session_id, line } => {
                    on_line(session_id, line);
                }
                StreamMessage::SessionCompleted { status, exit_code } => {
                    tracing::info!(
                        "Session completed: {} (exit code: {:?})",
                        status,
                        exit_code
                    );
                }
                StreamMessage::SessionCancelled => {
                    tracing::info!("Session cancelled");
                }
                StreamMessage::Error { message } => {
                    tracing::warn!("Server reported error: {}", message);
                }
                StreamMessage::Unknown { .. } => {
                    // Decode failures and unrecognized types are non-terminal;
                    // the channel stays open.
                }
            }

            if message.is_terminal() {
                self.phase = StreamPhase::Closed;
            }
        }

        Ok(())
    }
}
