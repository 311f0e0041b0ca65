use switchcraft_core::ScError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode {endpoint} response: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("invalid timestamp \"{input}\": {source}")]
    Timestamp {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid API base URL \"{0}\"")]
    BaseUrl(String),
}

impl From<ApiError> for ScError {
    fn from(err: ApiError) -> Self {
        ScError::Api(err.to_string())
    }
}
