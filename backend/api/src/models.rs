//! Response shapes of the public API.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::timestamp::parse_sc_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCounts {
    pub total: u32,
    pub active: u32,
}

impl PlayerCounts {
    /// Active players are a subset of the online total.
    pub fn is_consistent(&self) -> bool {
        self.active <= self.total
    }
}

/// Tick statistics, averaged over the last 100 ticks except `last_ms_per_tick`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TpsStats {
    pub tps: f32,
    pub avg_ms_per_tick: f32,
    pub last_ms_per_tick: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaytimeLeaderboard {
    #[serde(rename = "lastUpdated", deserialize_with = "sc_timestamp")]
    pub updated_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub entries: Vec<PlaytimeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaytimeEntry {
    #[serde(default)]
    pub uuid: Option<Uuid>,
    pub name: String,
    #[serde(rename = "time")]
    pub seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupporterGoal {
    #[serde(default)]
    pub supporter_url: Option<String>,
    #[serde(deserialize_with = "decimal")]
    pub current: f64,
    #[serde(deserialize_with = "decimal")]
    pub goal: f64,
    pub goal_met: bool,
}

impl SupporterGoal {
    /// `goal_met` agrees with the amounts.
    pub fn is_consistent(&self) -> bool {
        self.goal_met == (self.current >= self.goal)
    }

    /// Progress towards the goal in percent, uncapped.
    pub fn progress(&self) -> f64 {
        if self.goal <= 0.0 {
            100.0
        } else {
            self.current / self.goal * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathsEntry {
    #[serde(default)]
    pub uuid: Option<Uuid>,
    pub name: String,
    pub count: u64,
}

fn sc_timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_sc_timestamp(&raw).map_err(serde::de::Error::custom)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Decimal {
    Text(String),
    Number(f64),
}

/// Amounts are sent as decimal strings; plain numbers are accepted too.
fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Decimal::deserialize(deserializer)? {
        Decimal::Number(n) => Ok(n),
        Decimal::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid amount \"{s}\": {e}"))),
    }
}
