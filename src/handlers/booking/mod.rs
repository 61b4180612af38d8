pub mod artists;
pub mod shows;
pub mod venues;

use chrono::{DateTime, Utc};

use crate::error::ApiError;

/// Parse an RFC 3339 show time from client input.
pub(crate) fn parse_start_time(value: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ApiError::bad_request("start_time must be an RFC 3339 timestamp"))
}

/// Serialize a genre list into the stored text column format.
pub(crate) fn encode_genres(genres: &[String]) -> Result<String, ApiError> {
    Ok(serde_json::to_string(genres)?)
}
