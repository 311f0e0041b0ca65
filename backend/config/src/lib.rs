//! `switchcraft-config` — configuration for SwitchCraft bots and tools.
//!
//! Provides:
//! - Typed config schema (chatbox, REST API, logging)
//! - YAML loading from `~/.switchcraft/config.yaml`
//! - `${ENV_VAR}` substitution
//! - Default value application
//! - Validation with errors and warnings
//! - Redaction for safe display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{collect_referenced_vars, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config_value};
pub use redact::redact;
pub use schema::{ApiSection, ChatboxSection, LoggingConfig, SwitchcraftConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Load a config file and run it through substitution, defaults and
/// validation. The report is returned rather than logged so callers can
/// emit it once their subscriber is installed.
pub async fn load_and_prepare(path: &Path) -> Result<(SwitchcraftConfig, ValidationReport)> {
    let value = load_config_value(path).await?;
    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;
    prepare(value)
}

/// [`load_and_prepare`] for an in-memory value with an explicit environment.
pub fn prepare_with_env(
    value: &Value,
    env: &HashMap<String, String>,
) -> Result<(SwitchcraftConfig, ValidationReport)> {
    let value = resolve_env_vars_with(value, env).context("Failed to resolve env vars in config")?;
    prepare(value)
}

fn prepare(value: Value) -> Result<(SwitchcraftConfig, ValidationReport)> {
    let config: SwitchcraftConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;
    let config = apply_all_defaults(config);
    let report = validate(&config);
    Ok((config, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pipeline_substitutes_then_defaults() {
        let raw = json!({"chatbox": {"token": "${SC_TOKEN}"}, "api": {"timeoutSecs": 10}});
        let env = HashMap::from([("SC_TOKEN".to_string(), "secret-token-value".to_string())]);

        let (config, report) = prepare_with_env(&raw, &env).unwrap();
        assert_eq!(config.chatbox().token.as_deref(), Some("secret-token-value"));
        assert_eq!(config.chatbox().base_url.as_deref(), Some(defaults::DEFAULT_CHATBOX_URL));
        assert_eq!(config.api().timeout_secs, Some(10));
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn pipeline_rejects_wrong_types() {
        let raw = json!({"api": {"timeoutSecs": "soon"}});
        assert!(prepare_with_env(&raw, &HashMap::new()).is_err());
    }

    #[test]
    fn pipeline_reports_missing_env() {
        let raw = json!({"chatbox": {"token": "${NOT_SET_ANYWHERE}"}});
        let err = prepare_with_env(&raw, &HashMap::new()).unwrap_err();
        assert!(format!("{err:#}").contains("NOT_SET_ANYWHERE"));
    }
}
