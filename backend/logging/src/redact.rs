//! Log Redaction Layer
//!
//! Scrubs chatbox access tokens and bearer secrets from strings prior to logging.

use once_cell::sync::Lazy;
use regex::Regex;

/// `ws://host/v2/<token>`: the token is the final path segment.
static CHATBOX_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(wss?://[^\s/]+(?:/[^\s/]+)*/)([A-Za-z0-9\-_]{8,})\b").unwrap());
static TOKEN_PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)(token["']?\s*[=:]\s*["']?)([A-Za-z0-9\-_.]{8,})"#).unwrap());
static BEARER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());

const REDACTED: &str = "[REDACTED_TOKEN]";

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = CHATBOX_URL_RE.replace_all(input, format!("${{1}}{REDACTED}"));
    let redacted = TOKEN_PARAM_RE.replace_all(&redacted, format!("${{1}}{REDACTED}"));
    BEARER_RE.replace_all(&redacted, REDACTED).into_owned()
}
