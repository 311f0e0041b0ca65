//! The chatbox session: one connection, one receive loop.

use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use switchcraft_core::{CommandEvent, FormattingMode, GenericEvent, TellPacket, COMMAND_EVENT};
use switchcraft_logging::redact_sensitive_data;

use crate::config::ChatboxConfig;
use crate::error::ChatboxError;
use crate::handler::ChatboxHandler;
use crate::teller::Teller;
use crate::transport::{Frame, Transport, WebSocketTransport};

/// A persistent chatbox connection.
///
/// Construct with [`Chatbox::new`], call [`Chatbox::connect`], then drive it
/// with [`Chatbox::listen`]. The loop ends when the connection closes or a
/// read fails; reconnecting is up to the caller.
pub struct Chatbox {
    config: ChatboxConfig,
    transport: Option<Box<dyn Transport>>,
    teller: Teller,
    outbound_rx: mpsc::UnboundedReceiver<TellPacket>,
}

impl Chatbox {
    pub fn new(config: ChatboxConfig) -> Self {
        let (tx, outbound_rx) = mpsc::unbounded_channel();
        Self {
            config,
            transport: None,
            teller: Teller::new(tx),
            outbound_rx,
        }
    }

    /// A session over an already established transport.
    pub fn with_transport(config: ChatboxConfig, transport: impl Transport + 'static) -> Self {
        let mut chatbox = Self::new(config);
        chatbox.transport = Some(Box::new(transport));
        chatbox
    }

    pub fn config(&self) -> &ChatboxConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Handle for queueing tells from hooks or other tasks.
    pub fn teller(&self) -> Teller {
        self.teller.clone()
    }

    /// Open the websocket to `base_url + token`.
    pub async fn connect(&mut self) -> Result<(), ChatboxError> {
        let url = self.config.connect_url();
        info!(url = %redact_sensitive_data(&url), guest = self.config.is_guest(), "Connecting to chatbox");

        let transport = WebSocketTransport::connect(&url).await?;
        self.transport = Some(Box::new(transport));

        info!("Chatbox connection established");
        Ok(())
    }

    /// Send a tell immediately, bypassing the queue.
    pub async fn tell(
        &mut self,
        user: &str,
        text: &str,
        name: &str,
        mode: FormattingMode,
    ) -> Result<(), ChatboxError> {
        let transport = self.transport.as_mut().ok_or(ChatboxError::NotConnected)?;
        let packet = TellPacket::new(user, text, name, mode);
        send_packet(transport.as_mut(), &packet).await
    }

    /// Run the receive loop until the connection closes (`Ok`) or a read
    /// fails (`Err`). Each frame is fully handled, and the tells it queued
    /// are written, before the next frame is read.
    pub async fn listen<H>(&mut self, handler: &mut H) -> Result<(), ChatboxError>
    where
        H: ChatboxHandler + ?Sized,
    {
        let Self {
            transport,
            teller,
            outbound_rx,
            ..
        } = &mut *self;
        let transport = transport.as_mut().ok_or(ChatboxError::NotConnected)?;

        info!("Chatbox listening");
        let result = loop {
            tokio::select! {
                biased;

                Some(packet) = outbound_rx.recv() => {
                    if let Err(e) = send_packet(transport.as_mut(), &packet).await {
                        warn!(error = %e, user = %packet.user, "Tell not delivered");
                    }
                }

                frame = transport.recv() => match frame {
                    Some(Ok(frame)) => process_frame(&frame, handler, teller),
                    Some(Err(e)) => break Err(e),
                    None => break Ok(()),
                },
            }
        };

        match &result {
            Ok(()) => info!("Chatbox connection closed"),
            Err(e) => warn!(error = %e, "Chatbox receive loop terminated"),
        }
        self.transport = None;
        result
    }
}

async fn send_packet(transport: &mut dyn Transport, packet: &TellPacket) -> Result<(), ChatboxError> {
    let json = serde_json::to_string(packet)?;
    debug!(user = %packet.user, mode = %packet.mode, "Sending tell");
    transport.send(json).await
}

/// Demultiplex one frame into the handler's hooks.
fn process_frame<H>(frame: &Frame, handler: &mut H, teller: &Teller)
where
    H: ChatboxHandler + ?Sized,
{
    handler.on_raw(frame, teller);

    let header: GenericEvent = match serde_json::from_slice(frame.as_bytes()) {
        Ok(header) => header,
        Err(e) => {
            debug!(error = %e, "Dropping frame without event discriminant");
            handler.on_unparsed(frame, &e);
            return;
        }
    };

    match header.event.as_str() {
        COMMAND_EVENT => match serde_json::from_slice::<CommandEvent>(frame.as_bytes()) {
            Ok(event) => {
                debug!(command = %event.command, user = %event.user.name, "Command event");
                handler.on_command(&event, teller);
            }
            Err(e) => {
                debug!(error = %e, "Dropping malformed command frame");
                handler.on_unparsed(frame, &e);
            }
        },
        other => trace!(event = other, "Unhandled chatbox event"),
    }
}
