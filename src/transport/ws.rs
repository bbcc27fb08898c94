//! Streaming channel transport
//!
//! The [`StreamChannel`] trait is the seam between the streaming controller
//! and the wire: text frames in, text frames out, `None` when the remote side
//! closed. [`WsChannel`] is the real implementation over tokio-tungstenite;
//! tests drive the controller with scripted channels instead.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::core::{ClientError, ClientResult};

/// A persistent bidirectional channel carrying text frames
///
/// One channel serves exactly one streaming session; it is not reused.
#[async_trait]
pub trait StreamChannel: Send {
    /// Send one outbound text frame
    async fn send(&mut self, text: String) -> ClientResult<()>;

    /// Await the next inbound text frame
    ///
    /// Returns `Ok(None)` when the remote side closed the channel. Frames are
    /// yielded strictly in arrival order; transport noise (ping/pong, binary)
    /// is skipped here.
    async fn next_frame(&mut self) -> ClientResult<Option<String>>;

    /// Close the channel
    async fn close(&mut self) -> ClientResult<()>;
}

/// WebSocket implementation of [`StreamChannel`]
#[derive(Debug)]
pub struct WsChannel {
    inner: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsChannel {
    /// Open a WebSocket connection to the given URL
    pub async fn connect(url: &str) -> ClientResult<Self> {
        tracing::info!("Connecting streaming channel to {}", url);
        let (inner, _response) = connect_async(url)
            .await
            .map_err(|e| ClientError::Connect(e.to_string()))?;
        tracing::info!("Streaming channel connected");
        Ok(Self { inner })
    }

    fn map_ws_error(err: WsError) -> ClientError {
        match err {
            WsError::ConnectionClosed | WsError::AlreadyClosed => ClientError::ChannelClosed,
            other => ClientError::Channel(other.to_string()),
        }
    }
}

#[async_trait]
impl StreamChannel for WsChannel {
    async fn send(&mut self, text: String) -> ClientResult<()> {
        self.inner
            .send(Message::Text(text))
            .await
            .map_err(Self::map_ws_error)
    }

    async fn next_frame(&mut self) -> ClientResult<Option<String>> {
        while let Some(message) = self.inner.next().await {
            match message.map_err(Self::map_ws_error)? {
                Message::Text(text) => return Ok(Some(text)),
                Message::Close(_) => {
                    tracing::debug!("Remote closed the streaming channel");
                    return Ok(None);
                }
                // Keepalive and binary traffic is not part of the protocol
                other => tracing::trace!("Skipping non-text frame: {:?}", other),
            }
        }
        Ok(None)
    }

    async fn close(&mut self) -> ClientResult<()> {
        tracing::debug!("Closing streaming channel");
        match self.inner.close(None).await {
            Ok(()) | Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => Ok(()),
            Err(other) => Err(ClientError::Channel(other.to_string())),
        }
    }
}
