//! Two-phase command tree construction.
//!
//! A [`CommandBuilder`] is a plain value describing a node. Nothing is
//! indexed or checked until [`CommandBuilder::compile`], which assigns
//! argument positions, verifies the structure and hands back a frozen
//! [`CommandNode`].

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::RegistrationError;
use crate::invocation::Invocation;
use crate::types::{ArgType, ArgumentDef, CommandNode, Handler, HandlerResult};

/// Start describing a command node called `name`.
pub fn literal(name: impl Into<String>) -> CommandBuilder {
    CommandBuilder {
        name: name.into(),
        children: Vec::new(),
        arguments: Vec::new(),
        handler: None,
    }
}

#[derive(Clone)]
pub struct CommandBuilder {
    name: String,
    children: Vec<CommandBuilder>,
    arguments: Vec<(String, ArgType)>,
    handler: Option<Handler>,
}

impl CommandBuilder {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a sub-command. Resolution tries sub-commands in this order.
    pub fn then(mut self, child: CommandBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn then_all(mut self, children: impl IntoIterator<Item = CommandBuilder>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn string(self, name: impl Into<String>) -> Self {
        self.argument(name, ArgType::String)
    }

    pub fn number(self, name: impl Into<String>) -> Self {
        self.argument(name, ArgType::Number)
    }

    pub fn boolean(self, name: impl Into<String>) -> Self {
        self.argument(name, ArgType::Boolean)
    }

    /// Append an argument slot; its position is the number of slots before it.
    pub fn argument(mut self, name: impl Into<String>, arg_type: ArgType) -> Self {
        self.arguments.push((name.into(), arg_type));
        self
    }

    pub fn executes<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Freeze the tree. Every node must have a non-empty name without
    /// whitespace, unique sub-command and argument names, and every node
    /// without sub-commands must have a handler.
    pub fn compile(self) -> Result<CommandNode, RegistrationError> {
        self.compile_at("")
    }

    fn compile_at(self, parent: &str) -> Result<CommandNode, RegistrationError> {
        let path = if parent.is_empty() {
            self.name.clone()
        } else {
            format!("{parent} {}", self.name)
        };

        if self.name.is_empty() {
            return Err(RegistrationError::EmptyName {
                path: parent.to_string(),
            });
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(RegistrationError::InvalidName {
                path: parent.to_string(),
                name: self.name,
            });
        }

        let mut seen = HashSet::new();
        let mut arguments = Vec::with_capacity(self.arguments.len());
        for (index, (name, arg_type)) in self.arguments.into_iter().enumerate() {
            if !seen.insert(name.clone()) {
                return Err(RegistrationError::DuplicateArgument { path, name });
            }
            arguments.push(ArgumentDef { name, arg_type, index });
        }

        if self.children.is_empty() && self.handler.is_none() {
            return Err(RegistrationError::MissingHandler { path });
        }

        let mut seen = HashSet::new();
        let mut children = Vec::with_capacity(self.children.len());
        for child in self.children {
            if !seen.insert(child.name.clone()) {
                return Err(RegistrationError::DuplicateChild {
                    path,
                    name: child.name,
                });
            }
            children.push(child.compile_at(&path)?);
        }

        Ok(CommandNode {
            name: self.name,
            children,
            arguments,
            handler: self.handler,
        })
    }
}

impl fmt::Debug for CommandBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBuilder")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .field("executable", &self.handler.is_some())
            .field("children", &self.children)
            .finish()
    }
}
