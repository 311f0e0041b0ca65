use switchcraft_core::ScError;
use thiserror::Error;

/// Transport-level failures of a chatbox session.
#[derive(Debug, Error)]
pub enum ChatboxError {
    /// `url` is already redacted.
    #[error("failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("session is not connected; call connect() first")]
    NotConnected,

    #[error("chatbox read failed: {0}")]
    Read(String),

    #[error("chatbox send failed: {0}")]
    Send(String),

    #[error("failed to encode outbound packet: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<ChatboxError> for ScError {
    fn from(err: ChatboxError) -> Self {
        ScError::Chatbox(err.to_string())
    }
}
