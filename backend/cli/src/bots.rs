//! Demo bots runnable with `switchcraft bot <name>`.

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::info;

use switchcraft_chatbox::{Chatbox, ChatboxHandler, OnCommand, Teller};
use switchcraft_commands::{literal, CommandDispatcher, RegistrationError};
use switchcraft_core::{CommandEvent, FormattingMode};

use crate::config::Settings;
use crate::terminal_output::{note_info, note_warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoBot {
    /// `\echo <content>` repeats its argument
    Echo,
    /// `\multiply <a> <b>` multiplies two numbers
    Multiply,
    /// `\owneronly` reports whether it was sent owner-only
    OwnerOnly,
    /// `\switchcraft api|chatbox [commands]` nested sub-commands
    Showcase,
    /// `\hello` answered from a raw command hook
    Hello,
}

/// Build the command tree for `bot`. `Hello` has no tree and gets an empty
/// dispatcher.
pub fn dispatcher(bot: DemoBot, name: &str) -> Result<CommandDispatcher, RegistrationError> {
    let mut dispatcher = CommandDispatcher::new(name);
    match bot {
        DemoBot::Echo => dispatcher.register(literal("echo").string("content").executes(|inv| {
            inv.reply_markdown(&inv.read_string("content")?);
            Ok(())
        }))?,
        DemoBot::Multiply => dispatcher.register(
            literal("multiply")
                .number("factor1")
                .number("factor2")
                .executes(|inv| {
                    let a = inv.read_number("factor1")?;
                    let b = inv.read_number("factor2")?;
                    match a.checked_mul(b) {
                        Some(product) => inv.reply_markdown(&format!("Result is `{product}`")),
                        None => inv.error("That result is too large"),
                    }
                    Ok(())
                }),
        )?,
        DemoBot::OwnerOnly => dispatcher.register(literal("owneronly").executes(|inv| {
            let status = if inv.owner_only() { "actually" } else { "not" };
            inv.reply_markdown(&format!("You did **{status}** call this command owner-only"));
            Ok(())
        }))?,
        DemoBot::Showcase => dispatcher.register(
            literal("switchcraft")
                .then(literal("api").executes(|inv| {
                    inv.reply_markdown(
                        "The API client wraps the [SwitchCraft API](https://docs.sc3.io/faq/api.html).",
                    );
                    Ok(())
                }))
                .then(
                    literal("chatbox")
                        .executes(|inv| {
                            inv.reply_markdown("The chatbox session relays in-game commands to bots.");
                            Ok(())
                        })
                        .then(literal("commands").executes(|inv| {
                            inv.reply_markdown("Command trees are built on top of the chatbox session.");
                            Ok(())
                        })),
                ),
        )?,
        DemoBot::Hello => {}
    }
    Ok(dispatcher)
}

/// A bot written against the raw command hook, without a command tree.
pub fn hello_handler(name: String) -> impl ChatboxHandler {
    OnCommand(move |event: &CommandEvent, teller: &Teller| {
        if event.command != "hello" {
            return;
        }
        teller.tell(&event.user.uuid.to_string(), "&aHello World!", &name, FormattingMode::Format);
    })
}

pub async fn run(bot: DemoBot, settings: &Settings) -> Result<()> {
    let name = settings.bot_name();
    let mut chatbox = Chatbox::new(settings.chatbox());
    if chatbox.config().is_guest() {
        note_warn("Connecting as guest; set CHATBOX_TOKEN to receive commands");
    }

    let mut handler: Box<dyn ChatboxHandler> = match bot {
        DemoBot::Hello => Box::new(hello_handler(name.clone())),
        other => Box::new(dispatcher(other, &name).context("Invalid command tree")?),
    };

    chatbox.connect().await.context("Failed to connect to chatbox")?;
    info!(bot = ?bot, name = %name, "Bot running");
    note_info("Connected. Press Ctrl+C to stop.");

    tokio::select! {
        result = chatbox.listen(handler.as_mut()) => result.context("Chatbox connection lost")?,
        _ = tokio::signal::ctrl_c() => info!("Interrupted; shutting down"),
    }
    Ok(())
}
