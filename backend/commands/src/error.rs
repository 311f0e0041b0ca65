use switchcraft_core::ScError;
use thiserror::Error;

use crate::types::ArgType;

/// A command tree rejected at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("command at `{path}` has an empty name")]
    EmptyName { path: String },

    #[error("command name `{name}` under `{path}` contains whitespace")]
    InvalidName { path: String, name: String },

    #[error("`{path}` declares sub-command `{name}` more than once")]
    DuplicateChild { path: String, name: String },

    #[error("`{path}` declares argument `{name}` more than once")]
    DuplicateArgument { path: String, name: String },

    #[error("`{path}` has no sub-commands and no handler")]
    MissingHandler { path: String },

    #[error("`{path}` declares `help`, which is generated for every top-level command")]
    ReservedName { path: String },

    #[error("top-level command `{name}` is already registered")]
    DuplicateCommand { name: String },
}

impl From<RegistrationError> for ScError {
    fn from(err: RegistrationError) -> Self {
        ScError::Registration(err.to_string())
    }
}

/// Player input that could not be matched to a node or coerced into its
/// argument slots. The `Display` text is what the player is told.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("No subcommand or argument found. Check out &7\\{root} help &cfor more information.")]
    NoTarget { root: String },

    #[error("Missing argument \"{name}\"")]
    MissingArgument { name: String },

    #[error("Unable to convert \"{token}\" to {target}")]
    Conversion { token: String, target: ArgType },
}

/// A handler read an argument its node never declared with that type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("attempting to read nonexistent argument \"{name}\" as {requested}")]
    Undeclared { name: String, requested: ArgType },

    #[error("attempting to read argument \"{name}\" as {requested}, but type is defined as {declared}")]
    TypeMismatch {
        name: String,
        requested: ArgType,
        declared: ArgType,
    },
}

/// Why a handler invocation was aborted.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}
