use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::envelope;
use crate::database::artists::{ArtistAttributes, ArtistRepository};
use crate::database::models::Artist;
use crate::database::shows::ShowRepository;
use crate::error::ApiError;
use crate::AppState;

use super::encode_genres;

#[derive(Debug, Deserialize)]
pub struct ArtistInput {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Option<Vec<String>>,
    pub website: Option<String>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchInput {
    pub search_term: Option<String>,
}

/// GET /artists - id/name listing
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let artists = ArtistRepository::new(state.pool.clone()).list_all().await?;

    let data: Vec<Value> = artists
        .iter()
        .map(|artist| json!({ "id": artist.id, "name": artist.name }))
        .collect();

    Ok(envelope::ok("GET Success", json!({ "artists": data })))
}

/// POST /artists/search {search_term}
pub async fn search(
    State(state): State<AppState>,
    body: Option<Json<SearchInput>>,
) -> Result<Json<Value>, ApiError> {
    let term = body
        .and_then(|Json(input)| input.search_term)
        .unwrap_or_default();

    let matches = ArtistRepository::new(state.pool.clone()).search(&term).await?;
    let shows = ShowRepository::new(state.pool.clone());
    let now = Utc::now();

    let mut data = Vec::with_capacity(matches.len());
    for artist in &matches {
        let upcoming = shows
            .for_artist(artist.id)
            .await?
            .iter()
            .filter(|s| s.start_time > now)
            .count();
        data.push(json!({
            "id": artist.id,
            "name": artist.name,
            "num_upcoming_shows": upcoming,
        }));
    }

    Ok(envelope::ok("POST Success", json!({ "count": data.len(), "data": data })))
}

/// GET /artists/:id - full artist detail with past and upcoming shows
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let artist = ArtistRepository::new(state.pool.clone())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("artist {} not found", id)))?;

    let all_shows = ShowRepository::new(state.pool.clone()).for_artist(id).await?;
    let now = Utc::now();
    let (upcoming, past): (Vec<_>, Vec<_>) =
        all_shows.iter().partition(|s| s.start_time > now);

    let shape = |shows: &[&crate::database::models::ShowWithVenue]| -> Vec<Value> {
        shows
            .iter()
            .map(|s| {
                json!({
                    "venue_id": s.venue_id,
                    "venue_name": s.venue_name,
                    "venue_image_link": s.venue_image_link,
                    "start_time": s.start_time.to_rfc3339(),
                })
            })
            .collect()
    };

    Ok(envelope::ok(
        "GET Success",
        json!({
            "artist": {
                "id": artist.id,
                "name": artist.name,
                "genres": artist.genre_list(),
                "city": artist.city,
                "state": artist.state,
                "phone": artist.phone,
                "website": artist.website,
                "facebook_link": artist.facebook_link,
                "image_link": artist.image_link,
                "seeking_venue": artist.seeking_venue,
                "seeking_description": artist.seeking_description,
                "past_shows": shape(&past),
                "upcoming_shows": shape(&upcoming),
                "past_shows_count": past.len(),
                "upcoming_shows_count": upcoming.len(),
            }
        }),
    ))
}

/// POST /artists - create an artist
pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<ArtistInput>>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = body.ok_or_else(|| ApiError::bad_request("JSON body required"))?;
    let attrs = attributes_from(input, None)?;

    let created = ArtistRepository::new(state.pool.clone()).create(&attrs).await?;
    Ok(envelope::ok("POST Success", json!({ "artist": shape_artist(&created) })))
}

/// PUT /artists/:id - update; omitted fields keep their current values
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<ArtistInput>>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = body.ok_or_else(|| ApiError::bad_request("JSON body required"))?;

    let repo = ArtistRepository::new(state.pool.clone());
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("artist {} not found", id)))?;

    let attrs = attributes_from(input, Some(&existing))?;
    let updated = repo.update(id, &attrs).await?;

    Ok(envelope::ok("PUT Success", json!({ "artist": shape_artist(&updated) })))
}

/// DELETE /artists/:id - delete the artist; its shows cascade away with it
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !ArtistRepository::new(state.pool.clone()).delete(id).await? {
        return Err(ApiError::not_found(format!("artist {} not found", id)));
    }

    Ok(envelope::ok("DELETE Success", json!({ "delete": id })))
}

fn shape_artist(artist: &Artist) -> Value {
    json!({
        "id": artist.id,
        "name": artist.name,
        "genres": artist.genre_list(),
        "city": artist.city,
        "state": artist.state,
        "phone": artist.phone,
        "website": artist.website,
        "facebook_link": artist.facebook_link,
        "image_link": artist.image_link,
        "seeking_venue": artist.seeking_venue,
        "seeking_description": artist.seeking_description,
    })
}

fn attributes_from(
    input: ArtistInput,
    existing: Option<&Artist>,
) -> Result<ArtistAttributes, ApiError> {
    let required = |value: Option<String>, current: Option<String>, field: &str| {
        value
            .filter(|v| !v.is_empty())
            .or(current)
            .ok_or_else(|| ApiError::bad_request(format!("{} is required", field)))
    };

    let genres = match (input.genres, existing) {
        (Some(list), _) => encode_genres(&list)?,
        (None, Some(artist)) => artist.genres.clone(),
        (None, None) => return Err(ApiError::bad_request("genres is required")),
    };

    Ok(ArtistAttributes {
        name: required(input.name, existing.map(|a| a.name.clone()), "name")?,
        city: required(input.city, existing.map(|a| a.city.clone()), "city")?,
        state: required(input.state, existing.map(|a| a.state.clone()), "state")?,
        phone: input.phone.or_else(|| existing.and_then(|a| a.phone.clone())),
        image_link: input.image_link.or_else(|| existing.and_then(|a| a.image_link.clone())),
        facebook_link: input
            .facebook_link
            .or_else(|| existing.and_then(|a| a.facebook_link.clone())),
        genres,
        website: input.website.or_else(|| existing.and_then(|a| a.website.clone())),
        seeking_venue: input
            .seeking_venue
            .unwrap_or_else(|| existing.map(|a| a.seeking_venue).unwrap_or(false)),
        seeking_description: input
            .seeking_description
            .or_else(|| existing.and_then(|a| a.seeking_description.clone())),
    })
}
