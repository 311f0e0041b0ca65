//! The view a handler gets of one resolved command.

use switchcraft_chatbox::Teller;
use switchcraft_core::{CommandEvent, FormattingMode, IngameUser};

use crate::error::ArgumentError;
use crate::types::{ArgType, ArgValue, CommandNode, ParsedArgs};

const ERROR_PREFIX: &str = "&c&lError: &c";

pub struct Invocation<'a> {
    bot_name: &'a str,
    event: &'a CommandEvent,
    node: &'a CommandNode,
    path: String,
    args: ParsedArgs,
    teller: &'a Teller,
}

impl<'a> Invocation<'a> {
    pub(crate) fn new(
        bot_name: &'a str,
        event: &'a CommandEvent,
        node: &'a CommandNode,
        path: String,
        args: ParsedArgs,
        teller: &'a Teller,
    ) -> Self {
        Self {
            bot_name,
            event,
            node,
            path,
            args,
            teller,
        }
    }

    pub fn user(&self) -> &IngameUser {
        &self.event.user
    }

    pub fn owner_only(&self) -> bool {
        self.event.owner_only
    }

    /// Space-separated names from the top-level command to the resolved node.
    pub fn command_path(&self) -> &str {
        &self.path
    }

    /// Tokens exactly as the player typed them, before resolution.
    pub fn raw_args(&self) -> &[String] {
        &self.event.args
    }

    pub fn node(&self) -> &CommandNode {
        self.node
    }

    pub fn read_string(&self, name: &str) -> Result<String, ArgumentError> {
        match self.lookup(name, ArgType::String)? {
            ArgValue::String(s) => Ok(s.clone()),
            other => Err(mismatch(name, ArgType::String, other.arg_type())),
        }
    }

    pub fn read_number(&self, name: &str) -> Result<i64, ArgumentError> {
        match self.lookup(name, ArgType::Number)? {
            ArgValue::Number(n) => Ok(*n),
            other => Err(mismatch(name, ArgType::Number, other.arg_type())),
        }
    }

    pub fn read_boolean(&self, name: &str) -> Result<bool, ArgumentError> {
        match self.lookup(name, ArgType::Boolean)? {
            ArgValue::Boolean(b) => Ok(*b),
            other => Err(mismatch(name, ArgType::Boolean, other.arg_type())),
        }
    }

    fn lookup(&self, name: &str, requested: ArgType) -> Result<&ArgValue, ArgumentError> {
        let undeclared = || ArgumentError::Undeclared {
            name: name.to_string(),
            requested,
        };
        let def = self.node.argument(name).ok_or_else(undeclared)?;
        if def.arg_type != requested {
            return Err(mismatch(name, requested, def.arg_type));
        }
        self.args.get(name).ok_or_else(undeclared)
    }

    /// Reply to the invoking player using `&` formatting codes.
    pub fn reply(&self, text: &str) {
        self.tell(text, FormattingMode::Format);
    }

    pub fn reply_markdown(&self, text: &str) {
        self.tell(text, FormattingMode::Markdown);
    }

    /// Reply with the red error decoration, always in format mode.
    pub fn error(&self, message: &str) {
        self.tell(&format!("{ERROR_PREFIX}{message}"), FormattingMode::Format);
    }

    fn tell(&self, text: &str, mode: FormattingMode) {
        let user = self.event.user.uuid.to_string();
        self.teller.tell(&user, text, self.bot_name, mode);
    }
}

fn mismatch(name: &str, requested: ArgType, declared: ArgType) -> ArgumentError {
    ArgumentError::TypeMismatch {
        name: name.to_string(),
        requested,
        declared,
    }
}
