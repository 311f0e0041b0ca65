use thiserror::Error;

/// Top-level error type shared by the SwitchCraft crates.
///
/// Each crate keeps its own typed error and converts into this one at the
/// application boundary.
#[derive(Debug, Error)]
pub enum ScError {
    #[error("chatbox error: {0}")]
    Chatbox(String),

    #[error("command registration failed: {0}")]
    Registration(String),

    #[error("API error: {0}")]
    Api(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
