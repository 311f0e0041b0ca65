//! Config defaults: fill every unset field after loading.

use crate::schema::{ApiSection, ChatboxSection, LoggingConfig, SwitchcraftConfig};

pub const DEFAULT_CHATBOX_URL: &str = "wss://chat.sc3.io/v2/";
pub const DEFAULT_TOKEN: &str = "guest";
pub const DEFAULT_BOT_NAME: &str = "Bot";
pub const DEFAULT_API_URL: &str = "https://api.sc3.io/v3/";
pub const DEFAULT_USER_AGENT: &str = concat!("switchcraft-rs/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub fn apply_all_defaults(config: SwitchcraftConfig) -> SwitchcraftConfig {
    let config = apply_chatbox_defaults(config);
    let config = apply_api_defaults(config);
    apply_logging_defaults(config)
}

fn apply_chatbox_defaults(mut config: SwitchcraftConfig) -> SwitchcraftConfig {
    let chatbox = config.chatbox.get_or_insert_with(ChatboxSection::default);
    fill(&mut chatbox.token, DEFAULT_TOKEN);
    fill(&mut chatbox.base_url, DEFAULT_CHATBOX_URL);
    fill(&mut chatbox.bot_name, DEFAULT_BOT_NAME);
    config
}

fn apply_api_defaults(mut config: SwitchcraftConfig) -> SwitchcraftConfig {
    let api = config.api.get_or_insert_with(ApiSection::default);
    fill(&mut api.base_url, DEFAULT_API_URL);
    fill(&mut api.user_agent, DEFAULT_USER_AGENT);
    api.timeout_secs.get_or_insert(DEFAULT_TIMEOUT_SECS);
    config
}

fn apply_logging_defaults(mut config: SwitchcraftConfig) -> SwitchcraftConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    fill(&mut logging.level, DEFAULT_LOG_LEVEL);
    logging.json.get_or_insert(false);
    config
}

/// Blank strings count as unset.
fn fill(field: &mut Option<String>, default: &str) {
    if field.as_deref().map_or(true, |s| s.trim().is_empty()) {
        *field = Some(default.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_empty_config() {
        let cfg = apply_all_defaults(SwitchcraftConfig::default());
        let chatbox = cfg.chatbox();
        assert_eq!(chatbox.token.as_deref(), Some("guest"));
        assert_eq!(chatbox.base_url.as_deref(), Some(DEFAULT_CHATBOX_URL));
        assert_eq!(cfg.api().timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
        assert_eq!(cfg.logging().level.as_deref(), Some("info"));
        assert_eq!(cfg.logging().dir, None);
    }

    #[test]
    fn keeps_user_values() {
        let mut cfg = SwitchcraftConfig::default();
        cfg.chatbox = Some(ChatboxSection {
            token: Some("abc".into()),
            bot_name: Some("  ".into()),
            ..Default::default()
        });
        let cfg = apply_all_defaults(cfg);
        assert_eq!(cfg.chatbox().token.as_deref(), Some("abc"));
        assert_eq!(cfg.chatbox().bot_name.as_deref(), Some(DEFAULT_BOT_NAME));
    }
}
