use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::envelope;
use crate::database::models::Venue;
use crate::database::shows::ShowRepository;
use crate::database::venues::{VenueAttributes, VenueRepository};
use crate::error::ApiError;
use crate::AppState;

use super::encode_genres;

#[derive(Debug, Deserialize)]
pub struct VenueInput {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Option<Vec<String>>,
    pub website: Option<String>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchInput {
    pub search_term: Option<String>,
}

/// GET /venues - all venues grouped by (city, state), each with its count of
/// upcoming shows
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let venues = VenueRepository::new(state.pool.clone()).list_all().await?;
    let shows = ShowRepository::new(state.pool.clone());
    let now = Utc::now();

    let mut areas: BTreeMap<(String, String), Vec<Value>> = BTreeMap::new();
    for venue in &venues {
        let upcoming = shows
            .for_venue(venue.id)
            .await?
            .iter()
            .filter(|s| s.start_time > now)
            .count();

        areas
            .entry((venue.city.clone(), venue.state.clone()))
            .or_default()
            .push(json!({
                "id": venue.id,
                "name": venue.name,
                "num_upcoming_shows": upcoming,
            }));
    }

    let data: Vec<Value> = areas
        .into_iter()
        .map(|((city, venue_state), entries)| {
            json!({ "city": city, "state": venue_state, "venues": entries })
        })
        .collect();

    Ok(envelope::ok("GET Success", json!({ "venues": data })))
}

/// POST /venues/search {search_term} - case-insensitive substring match on
/// the name; zero matches is still a success
pub async fn search(
    State(state): State<AppState>,
    body: Option<Json<SearchInput>>,
) -> Result<Json<Value>, ApiError> {
    let term = body
        .and_then(|Json(input)| input.search_term)
        .unwrap_or_default();

    let matches = VenueRepository::new(state.pool.clone()).search(&term).await?;
    let shows = ShowRepository::new(state.pool.clone());
    let now = Utc::now();

    let mut data = Vec::with_capacity(matches.len());
    for venue in &matches {
        let upcoming = shows
            .for_venue(venue.id)
            .await?
            .iter()
            .filter(|s| s.start_time > now)
            .count();
        data.push(json!({
            "id": venue.id,
            "name": venue.name,
            "num_upcoming_shows": upcoming,
        }));
    }

    Ok(envelope::ok("POST Success", json!({ "count": data.len(), "data": data })))
}

/// GET /venues/:id - full venue detail with past and upcoming shows
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let venue = VenueRepository::new(state.pool.clone())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("venue {} not found", id)))?;

    let all_shows = ShowRepository::new(state.pool.clone()).for_venue(id).await?;
    let now = Utc::now();
    let (upcoming, past): (Vec<_>, Vec<_>) =
        all_shows.iter().partition(|s| s.start_time > now);

    let shape = |shows: &[&crate::database::models::ShowWithArtist]| -> Vec<Value> {
        shows
            .iter()
            .map(|s| {
                json!({
                    "artist_id": s.artist_id,
                    "artist_name": s.artist_name,
                    "artist_image_link": s.artist_image_link,
                    "start_time": s.start_time.to_rfc3339(),
                })
            })
            .collect()
    };

    Ok(envelope::ok(
        "GET Success",
        json!({
            "venue": {
                "id": venue.id,
                "name": venue.name,
                "genres": venue.genre_list(),
                "address": venue.address,
                "city": venue.city,
                "state": venue.state,
                "phone": venue.phone,
                "website": venue.website,
                "facebook_link": venue.facebook_link,
                "image_link": venue.image_link,
                "seeking_talent": venue.seeking_talent,
                "seeking_description": venue.seeking_description,
                "past_shows": shape(&past),
                "upcoming_shows": shape(&upcoming),
                "past_shows_count": past.len(),
                "upcoming_shows_count": upcoming.len(),
            }
        }),
    ))
}

/// POST /venues - create a venue
pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<VenueInput>>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = body.ok_or_else(|| ApiError::bad_request("JSON body required"))?;
    let attrs = attributes_from(input, None)?;

    let created = VenueRepository::new(state.pool.clone()).create(&attrs).await?;
    Ok(envelope::ok("POST Success", json!({ "venue": shape_venue(&created) })))
}

/// PUT /venues/:id - update; omitted fields keep their current values
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<VenueInput>>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = body.ok_or_else(|| ApiError::bad_request("JSON body required"))?;

    let repo = VenueRepository::new(state.pool.clone());
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("venue {} not found", id)))?;

    let attrs = attributes_from(input, Some(&existing))?;
    let updated = repo.update(id, &attrs).await?;

    Ok(envelope::ok("PUT Success", json!({ "venue": shape_venue(&updated) })))
}

/// DELETE /venues/:id - delete the venue; its shows cascade away with it
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !VenueRepository::new(state.pool.clone()).delete(id).await? {
        return Err(ApiError::not_found(format!("venue {} not found", id)));
    }

    Ok(envelope::ok("DELETE Success", json!({ "delete": id })))
}

fn shape_venue(venue: &Venue) -> Value {
    json!({
        "id": venue.id,
        "name": venue.name,
        "genres": venue.genre_list(),
        "address": venue.address,
        "city": venue.city,
        "state": venue.state,
        "phone": venue.phone,
        "website": venue.website,
        "facebook_link": venue.facebook_link,
        "image_link": venue.image_link,
        "seeking_talent": venue.seeking_talent,
        "seeking_description": venue.seeking_description,
    })
}

/// Resolve the full attribute set from the request, falling back to an
/// existing row for updates. Creates require name/city/state/address/genres.
fn attributes_from(input: VenueInput, existing: Option<&Venue>) -> Result<VenueAttributes, ApiError> {
    let required = |value: Option<String>, current: Option<String>, field: &str| {
        value
            .filter(|v| !v.is_empty())
            .or(current)
            .ok_or_else(|| ApiError::bad_request(format!("{} is required", field)))
    };

    let genres = match (input.genres, existing) {
        (Some(list), _) => encode_genres(&list)?,
        (None, Some(venue)) => venue.genres.clone(),
        (None, None) => return Err(ApiError::bad_request("genres is required")),
    };

    Ok(VenueAttributes {
        name: required(input.name, existing.map(|v| v.name.clone()), "name")?,
        city: required(input.city, existing.map(|v| v.city.clone()), "city")?,
        state: required(input.state, existing.map(|v| v.state.clone()), "state")?,
        address: required(input.address, existing.map(|v| v.address.clone()), "address")?,
        phone: input.phone.or_else(|| existing.and_then(|v| v.phone.clone())),
        image_link: input.image_link.or_else(|| existing.and_then(|v| v.image_link.clone())),
        facebook_link: input
            .facebook_link
            .or_else(|| existing.and_then(|v| v.facebook_link.clone())),
        genres,
        website: input.website.or_else(|| existing.and_then(|v| v.website.clone())),
        seeking_talent: input
            .seeking_talent
            .unwrap_or_else(|| existing.map(|v| v.seeking_talent).unwrap_or(false)),
        seeking_description: input
            .seeking_description
            .or_else(|| existing.and_then(|v| v.seeking_description.clone())),
    })
}
