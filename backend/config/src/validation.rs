//! Config validation: field checks collected into one report.

use thiserror::Error;
use tracing::{error, warn};

use crate::defaults::DEFAULT_TOKEN;
use crate::schema::SwitchcraftConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Emit every finding through `tracing`.
    pub fn log(&self) {
        for warning in &self.warnings {
            warn!(path = %warning.path, message = %warning.message, "Config warning");
        }
        for err in &self.errors {
            error!(path = %err.path, message = %err.message, "Config error");
        }
    }

    /// The first error, if any.
    pub fn into_result(self) -> Result<(), ConfigValidationError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

pub fn validate(config: &SwitchcraftConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_chatbox(config, &mut report);
    validate_api(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_chatbox(config: &SwitchcraftConfig, report: &mut ValidationReport) {
    let Some(chatbox) = &config.chatbox else { return };

    if let Some(url) = &chatbox.base_url {
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            report.error("chatbox.baseUrl", format!("'{url}' is not a ws:// or wss:// URL"));
        } else if !url.ends_with('/') {
            report.warn(
                "chatbox.baseUrl",
                "URL does not end with '/'; the token is appended directly to it",
            );
        }
    }

    match chatbox.token.as_deref() {
        None | Some(DEFAULT_TOKEN) => report.warn(
            "chatbox.token",
            "No chatbox token configured; connecting as guest, commands will not be received",
        ),
        Some(token) if token.chars().any(char::is_whitespace) => {
            report.error("chatbox.token", "Token cannot contain whitespace")
        }
        Some(_) => {}
    }

    if let Some(name) = &chatbox.bot_name {
        if name.trim().is_empty() {
            report.error("chatbox.botName", "Bot name cannot be empty");
        }
    }
}

fn validate_api(config: &SwitchcraftConfig, report: &mut ValidationReport) {
    let Some(api) = &config.api else { return };

    if let Some(url) = &api.base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            report.error("api.baseUrl", format!("'{url}' is not an http:// or https:// URL"));
        }
    }
    if api.timeout_secs == Some(0) {
        report.error("api.timeoutSecs", "timeoutSecs must be > 0");
    }
}

fn validate_logging(config: &SwitchcraftConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };

    if let Some(level) = &logging.level {
        if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            report.error(
                "logging.level",
                format!("Unknown log level '{level}'. Use one of: {}", LOG_LEVELS.join(", ")),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::apply_all_defaults;
    use crate::schema::{ApiSection, ChatboxSection, LoggingConfig};

    #[test]
    fn defaults_are_valid_with_guest_warning() {
        let report = validate(&apply_all_defaults(SwitchcraftConfig::default()));
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].path, "chatbox.token");
    }

    #[test]
    fn rejects_http_chatbox_url() {
        let cfg = SwitchcraftConfig {
            chatbox: Some(ChatboxSection {
                base_url: Some("https://chat.sc3.io/v2/".into()),
                token: Some("abc".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert_eq!(report.errors[0].path, "chatbox.baseUrl");
    }

    #[test]
    fn warns_on_missing_trailing_slash() {
        let cfg = SwitchcraftConfig {
            chatbox: Some(ChatboxSection {
                base_url: Some("wss://chat.sc3.io/v2".into()),
                token: Some("abc".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].path, "chatbox.baseUrl");
    }

    #[test]
    fn rejects_zero_timeout_and_bad_api_url() {
        let cfg = SwitchcraftConfig {
            api: Some(ApiSection {
                base_url: Some("ftp://api".into()),
                timeout_secs: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["api.baseUrl", "api.timeoutSecs"]);
    }

    #[test]
    fn rejects_unknown_log_level() {
        let cfg = SwitchcraftConfig {
            logging: Some(LoggingConfig {
                level: Some("loud".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = validate(&cfg).into_result().unwrap_err();
        assert_eq!(err.path, "logging.level");
    }

    #[test]
    fn log_level_case_insensitive() {
        let cfg = SwitchcraftConfig {
            logging: Some(LoggingConfig {
                level: Some("DEBUG".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(validate(&cfg).is_valid());
    }
}
