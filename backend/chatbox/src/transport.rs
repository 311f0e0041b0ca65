//! Message transports a session can run over.
//!
//! The session only needs "receive one frame" and "send one text frame";
//! framing, TLS, and ping/pong bookkeeping stay inside the transport.

use std::collections::VecDeque;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace};

use switchcraft_logging::redact_sensitive_data;

use crate::error::ChatboxError;

/// One inbound message as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

impl Frame {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Frame::Text(text) => text.as_bytes(),
            Frame::Binary(bytes) => bytes,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Frame::Text(_))
    }
}

impl From<&str> for Frame {
    fn from(text: &str) -> Self {
        Frame::Text(text.to_string())
    }
}

/// A bidirectional message connection.
#[async_trait]
pub trait Transport: Send {
    /// Next frame; `None` once the peer closed the connection cleanly.
    async fn recv(&mut self) -> Option<Result<Frame, ChatboxError>>;

    /// Send one text frame.
    async fn send(&mut self, text: String) -> Result<(), ChatboxError>;
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Websocket transport over `tokio-tungstenite` (plain or TLS).
pub struct WebSocketTransport {
    stream: WsStream,
}

impl WebSocketTransport {
    pub async fn connect(url: &str) -> Result<Self, ChatboxError> {
        let (stream, response) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| ChatboxError::Connect {
                url: redact_sensitive_data(url),
                reason: e.to_string(),
            })?;
        debug!(status = %response.status(), "Chatbox websocket handshake complete");
        Ok(Self { stream })
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn recv(&mut self) -> Option<Result<Frame, ChatboxError>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(Frame::Text(text.to_string()))),
                Ok(Message::Binary(bytes)) => return Some(Ok(Frame::Binary(bytes.to_vec()))),
                Ok(Message::Close(frame)) => {
                    debug!(?frame, "Chatbox sent close frame");
                    return None;
                }
                // Pings are answered by tungstenite on the next read/write.
                Ok(other) => trace!(kind = ?other, "Skipping control frame"),
                Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                    return None;
                }
                Err(e) => return Some(Err(ChatboxError::Read(e.to_string()))),
            }
        }
    }

    async fn send(&mut self, text: String) -> Result<(), ChatboxError> {
        self.stream
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| ChatboxError::Send(e.to_string()))
    }
}

/// How a [`MemoryTransport`] behaves once its scripted frames run out.
#[derive(Debug, Clone)]
enum MemoryEnd {
    Close,
    Fail(String),
}

/// In-memory transport replaying scripted frames; sent frames are forwarded
/// to the receiver returned by [`MemoryTransport::new`].
///
/// Used by tests and offline demos.
pub struct MemoryTransport {
    inbound: VecDeque<Frame>,
    outbound: mpsc::UnboundedSender<String>,
    end: MemoryEnd,
}

impl MemoryTransport {
    pub fn new<I, F>(frames: I) -> (Self, mpsc::UnboundedReceiver<String>)
    where
        I: IntoIterator<Item = F>,
        F: Into<Frame>,
    {
        let (outbound, rx) = mpsc::unbounded_channel();
        let transport = Self {
            inbound: frames.into_iter().map(Into::into).collect(),
            outbound,
            end: MemoryEnd::Close,
        };
        (transport, rx)
    }

    /// Report a read error instead of a clean close after the last frame.
    pub fn then_fail(mut self, reason: impl Into<String>) -> Self {
        self.end = MemoryEnd::Fail(reason.into());
        self
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn recv(&mut self) -> Option<Result<Frame, ChatboxError>> {
        if let Some(frame) = self.inbound.pop_front() {
            return Some(Ok(frame));
        }
        match std::mem::replace(&mut self.end, MemoryEnd::Close) {
            MemoryEnd::Close => None,
            MemoryEnd::Fail(reason) => Some(Err(ChatboxError::Read(reason))),
        }
    }

    async fn send(&mut self, text: String) -> Result<(), ChatboxError> {
        self.outbound
            .send(text)
            .map_err(|_| ChatboxError::Send("memory transport receiver dropped".to_string()))
    }
}
