//! Session data model and lifecycle
//!
//! Wire types for the REST API plus the pure lifecycle state machine that
//! both transports feed into.

pub mod lifecycle;
pub mod types;

pub(crate) use types::SessionList;
pub use lifecycle::LifecycleState;
pub use types::{
    CancelAck, HealthStatus, OutputPayload, ServerInfo, Session, SessionOutput, SessionStatus,
    StartSessionResponse,
};
