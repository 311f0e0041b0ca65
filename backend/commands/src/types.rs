//! Command tree types.
//!
//! A [`CommandNode`] is the frozen form produced by compiling a
//! [`crate::CommandBuilder`]; it is never mutated after registration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::InvocationError;
use crate::invocation::Invocation;

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    String,
    Number,
    Boolean,
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArgType::String => "string",
            ArgType::Number => "number",
            ArgType::Boolean => "boolean",
        };
        f.write_str(s)
    }
}

/// A typed positional argument slot on a command node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDef {
    pub name: String,
    pub arg_type: ArgType,
    /// Position in the node's argument tokens, assigned in declaration order.
    pub index: usize,
}

/// A coerced argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    String(String),
    Number(i64),
    Boolean(bool),
}

impl ArgValue {
    pub fn arg_type(&self) -> ArgType {
        match self {
            ArgValue::String(_) => ArgType::String,
            ArgValue::Number(_) => ArgType::Number,
            ArgValue::Boolean(_) => ArgType::Boolean,
        }
    }
}

/// Argument values of one invocation, keyed by slot name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    values: HashMap<String, ArgValue>,
}

impl ParsedArgs {
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: ArgValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// Outcome of a command handler.
pub type HandlerResult = Result<(), InvocationError>;

/// Executable attached to a command node.
pub type Handler = Arc<dyn Fn(&Invocation<'_>) -> HandlerResult + Send + Sync>;

/// A compiled command node.
#[derive(Clone)]
pub struct CommandNode {
    pub(crate) name: String,
    pub(crate) children: Vec<CommandNode>,
    pub(crate) arguments: Vec<ArgumentDef>,
    pub(crate) handler: Option<Handler>,
}

impl CommandNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sub-nodes in declaration order.
    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    /// Argument slots in positional order.
    pub fn arguments(&self) -> &[ArgumentDef] {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentDef> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// First sub-node with this exact name.
    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    pub fn is_executable(&self) -> bool {
        self.handler.is_some()
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .field("executable", &self.is_executable())
            .field("children", &self.children)
            .finish()
    }
}
