use switchcraft_core::CommandEvent;

use crate::teller::Teller;
use crate::transport::Frame;

/// Hooks invoked by [`crate::Chatbox::listen`], one frame at a time.
///
/// Every method defaults to a no-op; implement only what the bot needs.
/// Hooks run on the receive loop, so the next frame is not read until they
/// return.
pub trait ChatboxHandler: Send {
    /// Called for every frame before any decoding.
    fn on_raw(&mut self, _frame: &Frame, _teller: &Teller) {}

    /// Called for frames whose `event` is `"command"`.
    fn on_command(&mut self, _event: &CommandEvent, _teller: &Teller) {}

    /// Called when a frame has no decodable `event` field, or a command frame
    /// does not match the command shape. The frame is dropped afterwards.
    fn on_unparsed(&mut self, _frame: &Frame, _error: &serde_json::Error) {}
}

/// A handler that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl ChatboxHandler for NoopHandler {}

/// Adapts a closure into a handler that only reacts to command events.
pub struct OnCommand<F>(pub F);

impl<F> ChatboxHandler for OnCommand<F>
where
    F: FnMut(&CommandEvent, &Teller) + Send,
{
    fn on_command(&mut self, event: &CommandEvent, teller: &Teller) {
        (self.0)(event, teller)
    }
}
