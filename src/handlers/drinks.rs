use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::envelope;
use crate::database::drinks::DrinkRepository;
use crate::database::models::Drink;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DrinkInput {
    pub title: Option<String>,
    pub recipe: Option<Value>,
}

fn short_all(drinks: &[Drink]) -> Result<Vec<Value>, ApiError> {
    drinks.iter().map(|d| d.short().map_err(ApiError::from)).collect()
}

fn long_all(drinks: &[Drink]) -> Result<Vec<Value>, ApiError> {
    drinks.iter().map(|d| d.long().map_err(ApiError::from)).collect()
}

/// Accept a recipe as either an ingredient array or a single ingredient
/// object, and store it as a JSON array string.
fn encode_recipe(recipe: Value) -> Result<String, ApiError> {
    let normalized = match recipe {
        Value::Array(items) => Value::Array(items),
        Value::Object(item) => Value::Array(vec![Value::Object(item)]),
        _ => return Err(ApiError::bad_request("recipe must be an object or an array")),
    };
    Ok(serde_json::to_string(&normalized)?)
}

/// GET /drinks - public short-form listing
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let drinks = DrinkRepository::new(state.pool.clone()).list_all().await?;
    Ok(envelope::ok("GET Success", json!({ "drinks": short_all(&drinks)? })))
}

/// GET /drinks-detail - long-form listing, requires `get:drinks-detail`
pub async fn detail(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let drinks = DrinkRepository::new(state.pool.clone()).list_all().await?;
    Ok(envelope::ok("GET Success", json!({ "drinks": long_all(&drinks)? })))
}

/// POST /drinks - create a drink, requires `post:drinks`
pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<DrinkInput>>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = body.ok_or_else(|| ApiError::bad_request("JSON body required"))?;

    let title = input
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("title is required"))?;
    let recipe = input.recipe.ok_or_else(|| ApiError::bad_request("recipe is required"))?;
    let recipe = encode_recipe(recipe)?;

    let created = DrinkRepository::new(state.pool.clone()).create(&title, &recipe).await?;
    Ok(envelope::ok("POST Success", json!({ "drinks": [created.long()?] })))
}

/// PATCH /drinks/:id - partial update, requires `patch:drinks`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<DrinkInput>>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = body.ok_or_else(|| ApiError::bad_request("JSON body required"))?;

    let repo = DrinkRepository::new(state.pool.clone());
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("drink {} not found", id)))?;

    let title = input.title.filter(|t| !t.is_empty()).unwrap_or(existing.title);
    let recipe = match input.recipe {
        Some(recipe) => encode_recipe(recipe)?,
        None => existing.recipe,
    };

    let updated = repo.update(id, &title, &recipe).await?;
    Ok(envelope::ok("PATCH Success", json!({ "drinks": [updated.long()?] })))
}

/// DELETE /drinks/:id - requires `delete:drinks`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !DrinkRepository::new(state.pool.clone()).delete(id).await? {
        return Err(ApiError::not_found(format!("drink {} not found", id)));
    }

    Ok(envelope::ok("DELETE Success", json!({ "delete": id })))
}
