use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{DeathsEntry, PlayerCounts, PlaytimeLeaderboard, SupporterGoal, TpsStats};

pub const DEFAULT_API_URL: &str = "https://api.sc3.io/v3/";
pub const DEFAULT_USER_AGENT: &str = concat!("switchcraft-rs/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the SwitchCraft REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = normalize_base(base_url)?;
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Request {
                endpoint: base_url.clone(),
                source,
            })?;
        Ok(Self { client, base_url })
    }

    pub fn with_defaults() -> Result<Self, ApiError> {
        Self::new(DEFAULT_API_URL, DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    pub async fn player_counts(&self) -> Result<PlayerCounts, ApiError> {
        self.get_json("players").await
    }

    pub async fn tps(&self) -> Result<TpsStats, ApiError> {
        self.get_json("tps").await
    }

    /// Most active players, longest playtime first.
    pub async fn playtime_leaderboard(&self) -> Result<PlaytimeLeaderboard, ApiError> {
        self.get_json("activetime").await
    }

    pub async fn supporter_goal(&self) -> Result<SupporterGoal, ApiError> {
        self.get_json("supporter").await
    }

    pub async fn deaths_leaderboard(&self) -> Result<Vec<DeathsEntry>, ApiError> {
        self.get_json("deaths").await
    }

    /// CIDR ranges of the server's outbound proxies.
    pub async fn proxy_ranges(&self) -> Result<Vec<String>, ApiError> {
        self.get_json("proxies").await
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.endpoint_url(endpoint);
        debug!(url = %url, "Fetching from SwitchCraft API");

        let request_error = |source: reqwest::Error| ApiError::Request {
            endpoint: endpoint.to_string(),
            source,
        };
        let response = self.client.get(&url).send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }

        let body = response.text().await.map_err(request_error)?;
        decode(endpoint, &body)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

fn normalize_base(base_url: &str) -> Result<String, ApiError> {
    let trimmed = base_url.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ApiError::BaseUrl(base_url.to_string()));
    }
    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/"))
    }
}
