//! Command trees for chatbox bots.
//!
//! Describe commands with [`literal`], register them on a
//! [`CommandDispatcher`], and pass the dispatcher to
//! [`switchcraft_chatbox::Chatbox::listen`].

pub mod args;
pub mod builder;
pub mod dispatch;
pub mod error;
pub mod help;
pub mod invocation;
pub mod registry;
pub mod types;

pub use builder::{literal, CommandBuilder};
pub use dispatch::{CommandDispatcher, DispatchOutcome};
pub use error::{ArgumentError, InvocationError, RegistrationError, UsageError};
pub use invocation::Invocation;
pub use registry::{CommandRegistry, HELP_COMMAND};
pub use types::{ArgType, ArgValue, ArgumentDef, CommandNode, Handler, HandlerResult, ParsedArgs};
