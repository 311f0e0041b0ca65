pub mod client;
pub mod error;
pub mod models;
pub mod timestamp;

pub use client::{ApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use error::ApiError;
pub use models::{DeathsEntry, PlayerCounts, PlaytimeEntry, PlaytimeLeaderboard, SupporterGoal, TpsStats};
pub use timestamp::parse_sc_timestamp;
