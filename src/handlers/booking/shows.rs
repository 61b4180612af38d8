use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::envelope;
use crate::database::shows::ShowRepository;
use crate::error::ApiError;
use crate::AppState;

use super::parse_start_time;

#[derive(Debug, Deserialize)]
pub struct ShowInput {
    pub venue_id: Option<i64>,
    pub artist_id: Option<i64>,
    pub start_time: Option<String>,
}

/// GET /shows - all shows, with venue and artist names resolved
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let shows = ShowRepository::new(state.pool.clone()).list_all().await?;

    let data: Vec<Value> = shows
        .iter()
        .map(|show| {
            json!({
                "id": show.id,
                "venue_id": show.venue_id,
                "venue_name": show.venue_name,
                "artist_id": show.artist_id,
                "artist_name": show.artist_name,
                "artist_image_link": show.artist_image_link,
                "start_time": show.start_time.to_rfc3339(),
            })
        })
        .collect();

    Ok(envelope::ok("GET Success", json!({ "shows": data })))
}

/// POST /shows {venue_id, artist_id, start_time} - book a show.
/// A reference to a venue or artist that does not exist is unprocessable.
pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<ShowInput>>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = body.ok_or_else(|| ApiError::bad_request("JSON body required"))?;

    let venue_id = input.venue_id.ok_or_else(|| ApiError::bad_request("venue_id is required"))?;
    let artist_id =
        input.artist_id.ok_or_else(|| ApiError::bad_request("artist_id is required"))?;
    let start_time = input
        .start_time
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("start_time is required"))?;
    let start_time = parse_start_time(start_time)?;

    let created = ShowRepository::new(state.pool.clone())
        .create(venue_id, artist_id, start_time)
        .await?;

    Ok(envelope::ok(
        "POST Success",
        json!({
            "show": {
                "id": created.id,
                "venue_id": created.venue_id,
                "artist_id": created.artist_id,
                "start_time": created.start_time.to_rfc3339(),
            }
        }),
    ))
}
