use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::IngameUser;

/// Event discriminant carried by every inbound chatbox frame.
pub const COMMAND_EVENT: &str = "command";

/// Text rendering convention for an outbound tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormattingMode {
    /// Chatbox markdown dialect (`**bold**`, links, code spans).
    Markdown,
    /// Inline `&`-prefixed colour and style codes.
    Format,
}

impl fmt::Display for FormattingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormattingMode::Markdown => write!(f, "markdown"),
            FormattingMode::Format => write!(f, "format"),
        }
    }
}

/// Header decoded from every frame before the full shape is known.
#[derive(Debug, Clone, Deserialize)]
pub struct GenericEvent {
    pub event: String,
}

/// A player invoked a chatbox command (`\name arg arg`).
///
/// Serializes with its `"event": "command"` discriminant so it reads back as
/// an inbound frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename = "command", rename_all = "camelCase")]
pub struct CommandEvent {
    pub user: IngameUser,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub owner_only: bool,
}

/// Outbound directed message to a single player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "tell")]
pub struct TellPacket {
    pub user: String,
    pub text: String,
    pub name: String,
    pub mode: FormattingMode,
}

impl TellPacket {
    pub fn new(
        user: impl Into<String>,
        text: impl Into<String>,
        name: impl Into<String>,
        mode: FormattingMode,
    ) -> Self {
        Self {
            user: user.into(),
            text: text.into(),
            name: name.into(),
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tell_packet_wire_shape() {
        let packet = TellPacket::new("Steve", "&aHello", "Bot", FormattingMode::Format);
        let value = serde_json::to_value(&packet).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "tell",
                "user": "Steve",
                "text": "&aHello",
                "name": "Bot",
                "mode": "format"
            })
        );
    }

    #[test]
    fn test_command_event_deserialization() {
        let raw = r#"{
            "event": "command",
            "user": {
                "type": "ingame",
                "name": "Steve",
                "uuid": "5c5d3b5e-1f4e-4c1a-9d5e-8a3c1e2f4b6a",
                "displayName": "Steve",
                "group": "default",
                "pronouns": null,
                "world": "minecraft:overworld",
                "afk": false,
                "alt": false,
                "bot": false,
                "supporter": 2,
                "linkedUser": {
                    "type": "discord",
                    "id": "298014563780526081",
                    "name": "steve",
                    "displayName": "Steve",
                    "discriminator": "0",
                    "avatar": null,
                    "roles": [{ "id": "1", "name": "Member", "colour": 0 }]
                }
            },
            "command": "echo",
            "args": ["hello", "world"],
            "ownerOnly": true
        }"#;
        let header: GenericEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(header.event, COMMAND_EVENT);

        let event: CommandEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.command, "echo");
        assert_eq!(event.args, vec!["hello", "world"]);
        assert!(event.owner_only);
        assert_eq!(event.user.supporter.0, 2);
        let linked = event.user.linked_user.unwrap();
        assert_eq!(linked.id, 298014563780526081);
        assert_eq!(linked.roles.len(), 1);
    }

    #[test]
    fn test_command_event_serializes_discriminant() {
        let raw = r#"{"event":"command","user":{"type":"ingame","name":"Alex","uuid":"0f1e2d3c-4b5a-6978-8a9b-0c1d2e3f4a5b"},"command":"give","args":["7"],"ownerOnly":false}"#;
        let event: CommandEvent = serde_json::from_str(raw).unwrap();

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], COMMAND_EVENT);
        assert_eq!(value["ownerOnly"], false);

        let header: GenericEvent = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(header.event, COMMAND_EVENT);
        let back: CommandEvent = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_formatting_mode_display() {
        assert_eq!(FormattingMode::Markdown.to_string(), "markdown");
        assert_eq!(FormattingMode::Format.to_string(), "format");
    }
}
