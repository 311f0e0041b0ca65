use tokio::sync::mpsc;
use tracing::warn;

use switchcraft_core::{FormattingMode, TellPacket};

/// Cloneable fire-and-forget handle for sending tells through a session.
///
/// Packets are queued and written by the session's receive loop, which
/// serializes them with inbound processing. Queued packets are flushed
/// before the next inbound frame is read.
#[derive(Debug, Clone)]
pub struct Teller {
    tx: mpsc::UnboundedSender<TellPacket>,
}

impl Teller {
    pub(crate) fn new(tx: mpsc::UnboundedSender<TellPacket>) -> Self {
        Self { tx }
    }

    /// Build a teller whose packets land in the returned receiver instead of
    /// a session. Useful for driving handlers without a connection.
    pub fn detached() -> (Self, mpsc::UnboundedReceiver<TellPacket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Queue a directed message to `user` (name or uuid) shown as coming from `name`.
    pub fn tell(&self, user: &str, text: &str, name: &str, mode: FormattingMode) {
        self.send(TellPacket::new(user, text, name, mode));
    }

    pub fn send(&self, packet: TellPacket) {
        if self.tx.send(packet).is_err() {
            warn!("Dropping tell: chatbox session has shut down");
        }
    }
}
