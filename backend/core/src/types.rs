use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// An in-game player as reported by the chatbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngameUser {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub name: String,
    pub uuid: Uuid,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub pronouns: Option<String>,
    #[serde(default)]
    pub world: Option<String>,
    #[serde(default)]
    pub afk: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub supporter: SupporterTier,
    #[serde(default)]
    pub linked_user: Option<DiscordUser>,
}

impl IngameUser {
    /// Display name, falling back to the account name when the server sent none.
    pub fn display(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    /// Whether the player belongs to the server staff group.
    pub fn is_admin(&self) -> bool {
        self.group == "admin"
    }
}

/// A Discord account linked to an in-game player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordUser {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(deserialize_with = "snowflake")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub roles: Vec<DiscordRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordRole {
    #[serde(deserialize_with = "snowflake")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub colour: u32,
}

/// Supporter tier, `0` for players without one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupporterTier(pub u8);

impl SupporterTier {
    pub fn is_supporter(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for SupporterTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

/// Discord ids arrive either as JSON numbers or as strings.
fn snowflake<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<NumberOrText>::deserialize(deserializer)?.map(|raw| match raw {
        NumberOrText::Number(n) => n.to_string(),
        NumberOrText::Text(s) => s,
    }))
}
