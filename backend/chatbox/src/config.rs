/// Default chatbox endpoint; the access token is appended as the last path segment.
pub const DEFAULT_BASE_URL: &str = "wss://chat.sc3.io/v2/";

/// Token used when none is configured. Guests can read events but not tell.
pub const GUEST_TOKEN: &str = "guest";

/// Connection settings for a chatbox session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatboxConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl Default for ChatboxConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
        }
    }
}

impl ChatboxConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// The effective token, `guest` when unset or blank.
    pub fn token(&self) -> &str {
        match self.token.as_deref() {
            Some(token) if !token.trim().is_empty() => token,
            _ => GUEST_TOKEN,
        }
    }

    pub fn is_guest(&self) -> bool {
        self.token() == GUEST_TOKEN
    }

    /// Full websocket target: base address with the token appended verbatim.
    pub fn connect_url(&self) -> String {
        let base = if self.base_url.trim().is_empty() {
            DEFAULT_BASE_URL
        } else {
            self.base_url.as_str()
        };
        format!("{}{}", base, self.token())
    }
}
