//! Registered top-level commands.

use std::sync::Arc;

use tracing::debug;

use crate::builder::CommandBuilder;
use crate::error::RegistrationError;
use crate::help;
use crate::invocation::Invocation;
use crate::types::{CommandNode, HandlerResult};

/// Name of the help page generated under every top-level command.
pub const HELP_COMMAND: &str = "help";

#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    roots: Vec<CommandNode>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `builder` and add it as a top-level command with a generated
    /// `help` sub-command. The registry is left unchanged on error.
    pub fn register(&mut self, builder: CommandBuilder) -> Result<(), RegistrationError> {
        if self.find(builder.name()).is_some() {
            return Err(RegistrationError::DuplicateCommand {
                name: builder.name().to_string(),
            });
        }

        let mut root = builder.compile()?;
        if root.child(HELP_COMMAND).is_some() {
            return Err(RegistrationError::ReservedName {
                path: root.name().to_string(),
            });
        }

        root.children.push(CommandNode {
            name: HELP_COMMAND.to_string(),
            children: Vec::new(),
            arguments: Vec::new(),
            handler: None,
        });

        let page = help::render(&root);
        if let Some(node) = root.children.last_mut() {
            node.handler = Some(Arc::new(move |inv: &Invocation<'_>| -> HandlerResult {
                inv.reply_markdown(&page);
                Ok(())
            }));
        }

        debug!(command = %root.name(), children = root.children().len(), "Registered command");
        self.roots.push(root);
        Ok(())
    }

    /// Exact, case-sensitive lookup of a top-level command.
    pub fn find(&self, name: &str) -> Option<&CommandNode> {
        self.roots.iter().find(|r| r.name() == name)
    }

    pub fn commands(&self) -> &[CommandNode] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
