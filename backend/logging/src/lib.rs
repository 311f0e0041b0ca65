//! Telemetry and structured logging components for SwitchCraft.
//!
//! Handles log redaction, console/JSON output, file rotation, and the
//! per-command audit record.

pub mod command_log;
pub mod logger;
pub mod redact;

pub use command_log::{CommandLogEntry, CommandLogger, CommandOutcome};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
