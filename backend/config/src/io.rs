//! Config file discovery and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info};

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the config directory.
/// Priority: `SWITCHCRAFT_CONFIG_DIR` env > `~/.switchcraft/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SWITCHCRAFT_CONFIG_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    match dirs::home_dir() {
        Some(home) => home.join(".switchcraft"),
        None => PathBuf::from(".switchcraft"),
    }
}

pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Read the config file as an untyped value tree.
///
/// A missing file is not an error and yields an empty object. An empty file
/// is treated the same way.
pub async fn load_config_value(path: &Path) -> Result<Value> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(Value::Object(Default::default()));
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }

    let value: Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(match value {
        Value::Null => Value::Object(Default::default()),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("switchcraft-config-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn missing_file_is_empty_object() {
        let path = scratch_dir("missing").join("nope.yaml");
        let value = load_config_value(&path).await.unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[tokio::test]
    async fn reads_yaml() {
        let dir = scratch_dir("reads");
        let path = config_file_path(&dir);
        std::fs::write(&path, "chatbox:\n  botName: Helper\n").unwrap();

        let value = load_config_value(&path).await.unwrap();
        assert_eq!(value["chatbox"]["botName"], "Helper");
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn empty_file_is_empty_object() {
        let dir = scratch_dir("empty");
        let path = config_file_path(&dir);
        std::fs::write(&path, "").unwrap();

        let value = load_config_value(&path).await.unwrap();
        assert_eq!(value, serde_json::json!({}));
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn invalid_yaml_is_error() {
        let dir = scratch_dir("invalid");
        let path = config_file_path(&dir);
        std::fs::write(&path, "chatbox: [unclosed").unwrap();

        let err = load_config_value(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config YAML"));
        std::fs::remove_dir_all(dir).ok();
    }
}
