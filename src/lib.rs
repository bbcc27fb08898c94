pub mod client;
pub mod core;
pub mod protocol;
pub mod session;
pub mod streaming;
pub mod transport;

// Most callers only need the facade, the config and the error type
pub use crate::client::ClaudiaClient;
pub use crate::core::{ClientConfig, ClientError, ClientResult};
pub use crate::session::{LifecycleState, Session, SessionOutput, SessionStatus};
pub use crate::streaming::StreamOutcome;
