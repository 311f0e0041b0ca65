use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use switchcraft_api::ApiClient;
use switchcraft_chatbox::ChatboxConfig;
use switchcraft_config::{defaults, SwitchcraftConfig, ValidationReport};

/// The config file after environment overrides.
pub struct Settings {
    pub config: SwitchcraftConfig,
    pub report: ValidationReport,
    pub path: PathBuf,
}

impl Settings {
    /// Load `path` (or the default location) and layer environment
    /// variables over it.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => switchcraft_config::config_file_path(&switchcraft_config::config_dir()),
        };
        let (config, _) = switchcraft_config::load_and_prepare(&path).await?;
        let config = apply_env_overrides(config, |key| std::env::var(key).ok());
        // Overrides can change validity, so validate what will actually run.
        let report = switchcraft_config::validate(&config);
        Ok(Self { config, report, path })
    }

    pub fn chatbox(&self) -> ChatboxConfig {
        let section = self.config.chatbox();
        let config = ChatboxConfig {
            token: section.token,
            ..ChatboxConfig::default()
        };
        match section.base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }

    pub fn bot_name(&self) -> String {
        self.config
            .chatbox()
            .bot_name
            .unwrap_or_else(|| defaults::DEFAULT_BOT_NAME.to_string())
    }

    pub fn api_client(&self) -> Result<ApiClient> {
        let api = self.config.api();
        let base = api.base_url.as_deref().unwrap_or(defaults::DEFAULT_API_URL);
        let agent = api.user_agent.as_deref().unwrap_or(defaults::DEFAULT_USER_AGENT);
        let timeout = Duration::from_secs(api.timeout_secs.unwrap_or(defaults::DEFAULT_TIMEOUT_SECS));
        ApiClient::new(base, agent, timeout).context("Failed to build API client")
    }
}

/// `CHATBOX_TOKEN`, `CHATBOX_URL`, `SWITCHCRAFT_API_URL` and `RUST_LOG`
/// take precedence over the file. Blank values are ignored.
pub fn apply_env_overrides<F>(mut config: SwitchcraftConfig, env: F) -> SwitchcraftConfig
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    let chatbox = config.chatbox.get_or_insert_with(Default::default);
    if let Some(token) = var("CHATBOX_TOKEN") {
        chatbox.token = Some(token);
    }
    if let Some(url) = var("CHATBOX_URL") {
        chatbox.base_url = Some(url);
    }

    if let Some(url) = var("SWITCHCRAFT_API_URL") {
        config.api.get_or_insert_with(Default::default).base_url = Some(url);
    }

    if let Some(level) = var("RUST_LOG") {
        // Directive strings like `switchcraft=debug` are left to the EnvFilter.
        if !level.contains('=') && !level.contains(',') {
            config.logging.get_or_insert_with(Default::default).level = Some(level);
        }
    }

    config
}
