//! Chatbox session for SwitchCraft bots.
//!
//! A [`Chatbox`] owns one websocket connection and feeds inbound frames to a
//! [`ChatboxHandler`]; replies go out through a [`Teller`].

pub mod config;
pub mod error;
pub mod handler;
pub mod session;
pub mod teller;
pub mod transport;

pub use config::{ChatboxConfig, DEFAULT_BASE_URL, GUEST_TOKEN};
pub use error::ChatboxError;
pub use handler::{ChatboxHandler, NoopHandler, OnCommand};
pub use session::Chatbox;
pub use teller::Teller;
pub use transport::{Frame, MemoryTransport, Transport, WebSocketTransport};
