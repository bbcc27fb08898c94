//! Client facade
//!
//! One method per server capability, composing the transport adapters, the
//! codec and the lifecycle model. One-shot operations issue exactly one HTTP
//! request and decode the JSON body; streaming hands an open channel to the
//! [`StreamingController`] until it reaches a terminal state.
//!
//! The facade performs no console I/O; streaming output goes through the
//! caller-supplied line callback.

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::core::{ClientConfig, ClientError, ClientResult};
use crate::protocol::StartCommand;
use crate::session::{
    CancelAck, HealthStatus, LifecycleState, ServerInfo, Session, SessionList, SessionOutput,
    StartSessionResponse,
};
use crate::streaming::{StreamOutcome, StreamingController};
use crate::transport::{HttpTransport, WsChannel};

/// Client for the Claudia session server
///
/// Cheap to clone; one-shot operations are independent and may run
/// concurrently against each other.
#[derive(Debug, Clone)]
pub struct ClaudiaClient {
    config: ClientConfig,
    http: HttpTransport,
}

impl ClaudiaClient {
    /// Create a client from a configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = HttpTransport::new(&config.server_url, config.request_timeout)?;
        Ok(Self { config, http })
    }

    /// Create a client with the default configuration (localhost server)
    pub fn with_defaults() -> ClientResult<Self> {
        Self::new(ClientConfig::default())
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn decode<T: DeserializeOwned>(context: &str, body: &str) -> ClientResult<T> {
        serde_json::from_str(body).map_err(|e| ClientError::decode(context, e))
    }

    fn model_or_default(&self, model: Option<&str>) -> String {
        model
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_model.clone())
    }

    // ========================================================================
    // One-shot operations
    // ========================================================================

    /// Start a new session, returning its ID
    pub async fn start_session(
        &self,
        project_path: &str,
        prompt: &str,
        model: Option<&str>,
    ) -> ClientResult<String> {
        let command = StartCommand::new(project_path, prompt, self.model_or_default(model));
        self.post_session(&command).await
    }

    /// Continue the most recent conversation in the project
    pub async fn continue_session(
        &self,
        project_path: &str,
        prompt: &str,
        model: Option<&str>,
    ) -> ClientResult<String> {
        let command = StartCommand::new(project_path, prompt, self.model_or_default(model))
            .with_continue_conversation();
        self.post_session(&command).await
    }

    /// Resume a specific earlier session with a new prompt
    pub async fn resume_session(
        &self,
        session_id: &str,
        project_path: &str,
        prompt: &str,
        model: Option<&str>,
    ) -> ClientResult<String> {
        let command = StartCommand::new(project_path, prompt, self.model_or_default(model))
            .with_resume(session_id);
        self.post_session(&command).await
    }

    async fn post_session(&self, command: &StartCommand) -> ClientResult<String> {
        let body = serde_json::to_value(command)
            .map_err(|e| ClientError::decode("start request", e))?;
        let response = self
            .http
            .request(Method::POST, "/api/sessions", &[], Some(&body))
            .await?;
        let started: StartSessionResponse = Self::decode("start response", &response.body)?;
        tracing::info!("Session started: {}", started.session_id);
        Ok(started.session_id)
    }

    /// Fetch a session object
    pub async fn get_session(&self, session_id: &str) -> ClientResult<Session> {
        let path = format!("/api/sessions/{}", session_id);
        let response = self.http.request(Method::GET, &path, &[], None).await?;
        Self::decode("session object", &response.body)
    }

    /// Fetch a session's lifecycle state from a one-shot snapshot
    ///
    /// Same state shape the streaming controller produces, so both transports
    /// answer the status question identically.
    pub async fn get_lifecycle(&self, session_id: &str) -> ClientResult<LifecycleState> {
        let session = self.get_session(session_id).await?;
        let mut state = LifecycleState::from_snapshot(session.status, session.exit_code);
        state.session_id = Some(session.id);
        Ok(state)
    }

    /// Fetch session output, optionally limited to the last `lines` lines
    pub async fn get_session_output(
        &self,
        session_id: &str,
        lines: Option<usize>,
        format: Option<&str>,
    ) -> ClientResult<SessionOutput> {
        let path = format!("/api/sessions/{}/output", session_id);
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(lines) = lines {
            query.push(("lines", lines.to_string()));
        }
        if let Some(format) = format {
            query.push(("format", format.to_string()));
        }

        let response = self.http.request(Method::GET, &path, &query, None).await?;
        Self::decode("session output", &response.body)
    }

    /// List sessions, optionally only the active ones
    pub async fn list_sessions(&self, active_only: bool) -> ClientResult<Vec<Session>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if active_only {
            query.push(("active_only", "true".to_string()));
        }

        let response = self
            .http
            .request(Method::GET, "/api/sessions", &query, None)
            .await?;
        let list: SessionList = Self::decode("session list", &response.body)?;
        Ok(list.sessions)
    }

    /// Cancel a session
    pub async fn cancel_session(&self, session_id: &str) -> ClientResult<CancelAck> {
        let path = format!("/api/sessions/{}", session_id);
        let response = self.http.request(Method::DELETE, &path, &[], None).await?;
        let ack: CancelAck = Self::decode("cancel response", &response.body)?;
        tracing::info!("Session cancelled: {}", ack.message);
        Ok(ack)
    }

    /// Fetch server info
    pub async fn get_server_info(&self) -> ClientResult<ServerInfo> {
        let response = self.http.request(Method::GET, "/info", &[], None).await?;
        Self::decode("server info", &response.body)
    }

    /// Check server health
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        let response = self.http.request(Method::GET, "/health", &[], None).await?;
        Self::decode("health response", &response.body)
    }

    // ========================================================================
    // Streaming
    // ========================================================================

    /// Start a streaming session and consume it to completion
    ///
    /// `on_line` receives each output line as `(session_id, line)`. Returns
    /// the final lifecycle state; the session ID may be absent if the channel
    /// closed before the server acknowledged the start command.
    pub async fn start_streaming_session(
        &self,
        project_path: &str,
        prompt: &str,
        model: Option<&str>,
        on_line: impl FnMut(&str, &str),
    ) -> ClientResult<StreamOutcome> {
        let command = StartCommand::new(project_path, prompt, self.model_or_default(model));
        self.stream_with_command(&command, on_line).await
    }

    /// Start a streaming session from an explicit command
    ///
    /// Use this for the continue/resume knobs on [`StartCommand`].
    pub async fn stream_with_command(
        &self,
        command: &StartCommand,
        on_line: impl FnMut(&str, &str),
    ) -> ClientResult<StreamOutcome> {
        let channel = WsChannel::connect(&self.config.ws_url).await?;
        StreamingController::new(channel).run(command, on_line).await
    }
}
