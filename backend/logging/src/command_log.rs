//! Command Audit Log
//!
//! One structured record per dispatched chatbox command, emitted on the
//! `chatbox_commands` target so it can be filtered or routed separately.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The handler ran to completion.
    Executed,
    /// The player's input was rejected before the handler ran.
    Rejected { reason: String },
    /// The handler returned an error or panicked.
    Failed { error: String },
}

#[derive(Debug, Serialize)]
pub struct CommandLogEntry {
    pub bot: String,
    pub user: String,
    pub path: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub outcome: CommandOutcome,
}

pub struct CommandLogger;

impl CommandLogger {
    /// Records a dispatch outcome through the tracing system.
    pub fn log(bot: &str, user: &str, path: &str, mut outcome: CommandOutcome) {
        match &mut outcome {
            CommandOutcome::Executed => {}
            CommandOutcome::Rejected { reason } => *reason = redact_sensitive_data(reason),
            CommandOutcome::Failed { error } => *error = redact_sensitive_data(error),
        }

        let entry = CommandLogEntry {
            bot: bot.into(),
            user: user.into(),
            path: path.into(),
            timestamp: Utc::now(),
            outcome,
        };

        info!(target: "chatbox_commands", entry = ?entry, "Command dispatched");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_flat_outcome() {
        let entry = CommandLogEntry {
            bot: "Echo".into(),
            user: "Steve".into(),
            path: "echo".into(),
            timestamp: Utc::now(),
            outcome: CommandOutcome::Rejected { reason: "Missing argument \"content\"".into() },
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["outcome"], "rejected");
        assert_eq!(value["reason"], "Missing argument \"content\"");
        assert_eq!(value["path"], "echo");
    }
}
