//! Command dispatch: resolve a command event against the registered trees
//! and run the target handler.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, trace};

use switchcraft_chatbox::{ChatboxHandler, Teller};
use switchcraft_core::CommandEvent;
use switchcraft_logging::{CommandLogger, CommandOutcome};

use crate::args::parse_arguments;
use crate::builder::CommandBuilder;
use crate::error::{RegistrationError, UsageError};
use crate::invocation::Invocation;
use crate::registry::CommandRegistry;
use crate::types::{CommandNode, ParsedArgs};

/// What happened to one command event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No top-level command with that name is registered here.
    Ignored,
    Executed { path: String },
    /// The player was told what was wrong; no handler ran.
    Rejected { path: String, error: UsageError },
    /// The handler returned an error or panicked.
    Failed { path: String, error: String },
}

/// A named bot's command set. Replies are sent under `name`.
pub struct CommandDispatcher {
    name: String,
    registry: CommandRegistry,
}

impl CommandDispatcher {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: CommandRegistry::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn register(&mut self, builder: CommandBuilder) -> Result<(), RegistrationError> {
        self.registry.register(builder)
    }

    /// Resolve `event` and invoke at most one handler, synchronously.
    pub fn dispatch(&self, event: &CommandEvent, teller: &Teller) -> DispatchOutcome {
        let Some(root) = self.registry.find(&event.command) else {
            trace!(command = %event.command, bot = %self.name, "Ignoring unregistered command");
            return DispatchOutcome::Ignored;
        };

        let outcome = match resolve(root, &event.args) {
            Ok((node, path, tokens)) => match parse_arguments(node.arguments(), tokens) {
                Ok(args) => self.invoke(event, node, path, args, teller),
                Err(error) => self.reject(event, root, path, error, teller),
            },
            Err(error) => self.reject(event, root, event.command.clone(), error, teller),
        };

        self.audit(event, &outcome);
        outcome
    }

    fn audit(&self, event: &CommandEvent, outcome: &DispatchOutcome) {
        let (path, logged) = match outcome {
            DispatchOutcome::Ignored => return,
            DispatchOutcome::Executed { path } => (path, CommandOutcome::Executed),
            DispatchOutcome::Rejected { path, error } => (
                path,
                CommandOutcome::Rejected {
                    reason: error.to_string(),
                },
            ),
            DispatchOutcome::Failed { path, error } => (path, CommandOutcome::Failed { error: error.clone() }),
        };
        CommandLogger::log(&self.name, &event.user.name, path, logged);
    }

    fn invoke(
        &self,
        event: &CommandEvent,
        node: &CommandNode,
        path: String,
        args: ParsedArgs,
        teller: &Teller,
    ) -> DispatchOutcome {
        let Some(handler) = node.handler() else {
            return self.reject(
                event,
                node,
                path,
                UsageError::NoTarget {
                    root: event.command.clone(),
                },
                teller,
            );
        };

        debug!(path = %path, user = %event.user.name, "Invoking command handler");
        let invocation = Invocation::new(&self.name, event, node, path.clone(), args, teller);
        match panic::catch_unwind(AssertUnwindSafe(|| handler(&invocation))) {
            Ok(Ok(())) => DispatchOutcome::Executed { path },
            Ok(Err(e)) => {
                error!(path = %path, error = %e, "Command handler failed");
                DispatchOutcome::Failed {
                    path,
                    error: e.to_string(),
                }
            }
            Err(payload) => {
                let error = panic_message(payload.as_ref());
                error!(path = %path, error = %error, "Command handler panicked");
                DispatchOutcome::Failed { path, error }
            }
        }
    }

    fn reject(
        &self,
        event: &CommandEvent,
        node: &CommandNode,
        path: String,
        error: UsageError,
        teller: &Teller,
    ) -> DispatchOutcome {
        debug!(path = %path, error = %error, "Rejecting command input");
        Invocation::new(&self.name, event, node, path.clone(), ParsedArgs::default(), teller)
            .error(&error.to_string());
        DispatchOutcome::Rejected { path, error }
    }
}

impl ChatboxHandler for CommandDispatcher {
    fn on_command(&mut self, event: &CommandEvent, teller: &Teller) {
        self.dispatch(event, teller);
    }
}

/// Walk down from `root` while the next token names a sub-command. The
/// node reached takes the remaining tokens as arguments, which is only
/// allowed when it declares argument slots.
fn resolve<'n>(
    root: &'n CommandNode,
    tokens: &'n [String],
) -> Result<(&'n CommandNode, String, &'n [String]), UsageError> {
    let no_target = || UsageError::NoTarget {
        root: root.name().to_string(),
    };

    let mut node = root;
    let mut path = root.name().to_string();
    let mut rest = tokens;

    while let Some((first, tail)) = rest.split_first() {
        if let Some(child) = node.child(first) {
            node = child;
            path.push(' ');
            path.push_str(child.name());
            rest = tail;
        } else if !node.arguments().is_empty() {
            break;
        } else {
            return Err(no_target());
        }
    }

    if !node.is_executable() {
        return Err(no_target());
    }
    Ok((node, path, rest))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use switchcraft_chatbox::{Chatbox, ChatboxConfig, Frame, MemoryTransport};
    use switchcraft_core::{FormattingMode, TellPacket};
    use tokio::sync::mpsc::UnboundedReceiver;

    use super::*;
    use crate::builder::literal;
    use crate::error::InvocationError;

    const USER: &str = r#"{"type":"ingame","name":"Steve","uuid":"5c5d3b5e-1f4e-4c1a-9d5e-8a3c1e2f4b6a","displayName":"Steve","group":"default"}"#;
    const UUID: &str = "5c5d3b5e-1f4e-4c1a-9d5e-8a3c1e2f4b6a";

    fn frame(command: &str, args: &[&str]) -> String {
        format!(
            r#"{{"event":"command","user":{USER},"command":"{command}","args":{},"ownerOnly":false}}"#,
            serde_json::to_string(args).unwrap()
        )
    }

    fn event(command: &str, args: &[&str]) -> CommandEvent {
        serde_json::from_str(&frame(command, args)).unwrap()
    }

    fn drain(rx: &mut UnboundedReceiver<TellPacket>) -> Vec<TellPacket> {
        let mut packets = Vec::new();
        while let Ok(p) = rx.try_recv() {
            packets.push(p);
        }
        packets
    }

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&Invocation<'_>) -> crate::HandlerResult + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        (count, move |_: &Invocation<'_>| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn test_unregistered_command_ignored() {
        let (count, handler) = counter();
        let mut dispatcher = CommandDispatcher::new("Bot");
        dispatcher.register(literal("echo").string("text").executes(handler)).unwrap();
        let (teller, mut rx) = Teller::detached();

        for name in ["other", "Echo", "echo2", ""] {
            assert_eq!(dispatcher.dispatch(&event(name, &["x"]), &teller), DispatchOutcome::Ignored);
        }
        assert!(drain(&mut rx).is_empty());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_typed_arguments_reach_handler() {
        let mut dispatcher = CommandDispatcher::new("Bot");
        dispatcher
            .register(literal("calc").number("a").string("b").executes(|inv| {
                let a = inv.read_number("a")?;
                let b = inv.read_string("b")?;
                inv.reply(&format!("{a} {b}"));
                Ok(())
            }))
            .unwrap();
        let (teller, mut rx) = Teller::detached();

        let outcome = dispatcher.dispatch(&event("calc", &["5", "hello"]), &teller);
        assert_eq!(outcome, DispatchOutcome::Executed { path: "calc".into() });

        let replies = drain(&mut rx);
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].text, "5 hello");
        assert_eq!(replies[0].user, UUID);
        assert_eq!(replies[0].name, "Bot");
    }

    #[test]
    fn test_quoted_string_after_subcommand() {
        let mut dispatcher = CommandDispatcher::new("Bot");
        dispatcher
            .register(literal("chat").then(literal("say").string("message").executes(|inv| {
                inv.reply(&inv.read_string("message")?);
                Ok(())
            })))
            .unwrap();
        let (teller, mut rx) = Teller::detached();

        dispatcher.dispatch(&event("chat", &["say", "\"hello", "world\""]), &teller);
        assert_eq!(drain(&mut rx)[0].text, "hello world");
    }

    #[test]
    fn test_missing_argument_reported() {
        let (count, handler) = counter();
        let mut dispatcher = CommandDispatcher::new("Bot");
        dispatcher.register(literal("mul").number("a").number("b").executes(handler)).unwrap();
        let (teller, mut rx) = Teller::detached();

        let outcome = dispatcher.dispatch(&event("mul", &["3"]), &teller);
        assert!(matches!(
            outcome,
            DispatchOutcome::Rejected { error: UsageError::MissingArgument { ref name }, .. } if name == "b"
        ));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        let replies = drain(&mut rx);
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].text, "&c&lError: &cMissing argument \"b\"");
        assert_eq!(replies[0].mode, FormattingMode::Format);
    }

    #[test]
    fn test_conversion_error_reported() {
        let (count, handler) = counter();
        let mut dispatcher = CommandDispatcher::new("Bot");
        dispatcher.register(literal("mul").number("a").executes(handler)).unwrap();
        let (teller, mut rx) = Teller::detached();

        dispatcher.dispatch(&event("mul", &["three"]), &teller);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(drain(&mut rx)[0].text, "&c&lError: &cUnable to convert \"three\" to number");
    }

    #[test]
    fn test_subcommand_wins_over_argument() {
        let (list_count, list) = counter();
        let (arg_count, arg) = counter();
        let mut dispatcher = CommandDispatcher::new("Bot");
        dispatcher
            .register(literal("todo").string("item").executes(arg).then(literal("list").executes(list)))
            .unwrap();
        let (teller, _rx) = Teller::detached();

        let outcome = dispatcher.dispatch(&event("todo", &["list"]), &teller);
        assert_eq!(outcome, DispatchOutcome::Executed { path: "todo list".into() });
        assert_eq!(list_count.load(Ordering::SeqCst), 1);
        assert_eq!(arg_count.load(Ordering::SeqCst), 0);

        dispatcher.dispatch(&event("todo", &["milk"]), &teller);
        assert_eq!(arg_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_no_target_reported() {
        let (count, handler) = counter();
        let mut dispatcher = CommandDispatcher::new("Bot");
        dispatcher.register(literal("tool").then(literal("run").executes(handler))).unwrap();
        let (teller, mut rx) = Teller::detached();

        for args in [&["nope"][..], &[][..]] {
            let outcome = dispatcher.dispatch(&event("tool", args), &teller);
            assert!(matches!(outcome, DispatchOutcome::Rejected { error: UsageError::NoTarget { .. }, .. }));
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);

        let replies = drain(&mut rx);
        assert_eq!(replies.len(), 2);
        assert_eq!(
            replies[0].text,
            "&c&lError: &cNo subcommand or argument found. Check out &7\\tool help &cfor more information."
        );
    }

    #[test]
    fn test_extra_tokens_on_leaf_without_arguments() {
        let (count, handler) = counter();
        let mut dispatcher = CommandDispatcher::new("Bot");
        dispatcher.register(literal("ping").executes(handler)).unwrap();
        let (teller, _rx) = Teller::detached();

        let outcome = dispatcher.dispatch(&event("ping", &["extra"]), &teller);
        assert!(matches!(outcome, DispatchOutcome::Rejected { .. }));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_help_is_stable() {
        let (_, handler) = counter();
        let mut dispatcher = CommandDispatcher::new("Bot");
        dispatcher
            .register(literal("tool").number("a").executes(handler).then(literal("list").string("filter").executes(|_| Ok(()))))
            .unwrap();
        let (teller, mut rx) = Teller::detached();

        dispatcher.dispatch(&event("tool", &["help"]), &teller);
        dispatcher.dispatch(&event("tool", &["help"]), &teller);
        let replies = drain(&mut rx);
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].text, replies[1].text);
        assert_eq!(replies[0].mode, FormattingMode::Markdown);
        assert_eq!(
            replies[0].text,
            "**\\tool Help Page**\n`\\tool [a: number]`\n↪ `\\tool list [filter: string]`\n↪ `\\tool help`"
        );
    }

    #[test]
    fn test_every_path_invoked_once() {
        let (root_count, root) = counter();
        let (add_count, add) = counter();
        let (remove_count, remove) = counter();
        let (flag_count, flag) = counter();
        let mut dispatcher = CommandDispatcher::new("Bot");
        dispatcher
            .register(
                literal("admin")
                    .executes(root)
                    .then(
                        literal("user")
                            .then(literal("add").string("name").number("level").executes(add))
                            .then(literal("remove").string("name").executes(remove)),
                    )
                    .then(literal("flag").boolean("on").executes(flag)),
            )
            .unwrap();
        let (teller, _rx) = Teller::detached();

        let calls: [(&[&str], &str); 4] = [
            (&[], "admin"),
            (&["user", "add", "steve", "3"], "admin user add"),
            (&["user", "remove", "steve"], "admin user remove"),
            (&["flag", "TRUE"], "admin flag"),
        ];
        for (args, path) in calls {
            assert_eq!(
                dispatcher.dispatch(&event("admin", args), &teller),
                DispatchOutcome::Executed { path: path.into() }
            );
        }
        for count in [root_count, add_count, remove_count, flag_count] {
            assert_eq!(count.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn test_handler_error_and_panic_are_contained() {
        let mut dispatcher = CommandDispatcher::new("Bot");
        dispatcher
            .register(literal("bad").executes(|inv| {
                inv.read_string("ghost")?;
                Ok(())
            }))
            .unwrap();
        dispatcher
            .register(literal("boom").executes(|_| panic!("kaboom")))
            .unwrap();
        dispatcher
            .register(literal("fail").executes(|_| Err(InvocationError::Failed(anyhow::anyhow!("backend down")))))
            .unwrap();
        let (teller, mut rx) = Teller::detached();

        let outcome = dispatcher.dispatch(&event("bad", &[]), &teller);
        assert!(matches!(outcome, DispatchOutcome::Failed { ref error, .. } if error.contains("ghost")));

        let outcome = dispatcher.dispatch(&event("boom", &[]), &teller);
        assert!(matches!(outcome, DispatchOutcome::Failed { ref error, .. } if error == "kaboom"));

        let outcome = dispatcher.dispatch(&event("fail", &[]), &teller);
        assert!(matches!(outcome, DispatchOutcome::Failed { ref error, .. } if error == "backend down"));

        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_session_survives_failed_invocation() {
        let mut dispatcher = CommandDispatcher::new("Bot");
        dispatcher
            .register(literal("bad").executes(|inv| {
                inv.read_number("missing")?;
                inv.reply("unreachable");
                Ok(())
            }))
            .unwrap();
        dispatcher
            .register(literal("echo").string("text").executes(|inv| {
                inv.reply(&inv.read_string("text")?);
                Ok(())
            }))
            .unwrap();

        let frames = vec![Frame::Text(frame("bad", &[])), Frame::Text(frame("echo", &["still", "here"]))];
        let (transport, mut sent) = MemoryTransport::new(frames);
        let mut chatbox = Chatbox::with_transport(ChatboxConfig::default(), transport);

        chatbox.listen(&mut dispatcher).await.unwrap();

        let tell: serde_json::Value = serde_json::from_str(&sent.recv().await.unwrap()).unwrap();
        assert_eq!(tell["text"], "still");
        assert_eq!(tell["user"], UUID);
        assert!(sent.try_recv().is_err());
    }
}
