use chrono::{DateTime, FixedOffset};

use crate::error::ApiError;

/// Parse an API timestamp such as `2022-10-22T20:50:45.6221607+01:00` or
/// `2024-05-29T15:16:28.042866052Z[UTC]`. Anything from the first `[` on is
/// a zone annotation and is ignored.
pub fn parse_sc_timestamp(input: &str) -> Result<DateTime<FixedOffset>, ApiError> {
    let trimmed = match input.find('[') {
        Some(pos) => &input[..pos],
        None => input,
    };
    DateTime::parse_from_rfc3339(trimmed).map_err(|source| ApiError::Timestamp {
        input: input.to_string(),
        source,
    })
}
