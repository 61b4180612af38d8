use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::api::envelope;
use crate::error::ApiError;
use crate::AppState;

/// In-process greeting store, owned by `AppState` and guarded by a lock.
/// Lives for the process lifetime; entries are added or replaced, never removed.
pub type GreetingStore = Arc<RwLock<HashMap<String, String>>>;

pub fn seed_store() -> GreetingStore {
    let seeded = [
        ("en", "hello"),
        ("es", "Hola"),
        ("ar", "مرحبا"),
        ("ru", "Привет"),
        ("fi", "Hei"),
        ("he", "שלום"),
        ("ja", "こんにちは"),
    ];

    let map = seeded
        .into_iter()
        .map(|(lang, greeting)| (lang.to_string(), greeting.to_string()))
        .collect();

    Arc::new(RwLock::new(map))
}

/// GET /greeting - full language-to-greeting map
pub async fn all(State(state): State<AppState>) -> Json<Value> {
    let greetings = state.greetings.read().await;
    envelope::ok("GET Success", json!({ "greetings": &*greetings }))
}

/// GET /greeting/:lang - single greeting
pub async fn one(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let greetings = state.greetings.read().await;
    let greeting = greetings
        .get(&lang)
        .ok_or_else(|| ApiError::not_found(format!("no greeting for language {}", lang)))?;

    Ok(envelope::ok("GET Success", json!({ "greeting": greeting })))
}

/// POST /greeting {lang, greeting} - add or replace an entry. Deserializes
/// into a raw value so a missing or non-string field gets a 400 naming it.
pub async fn add(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = body.ok_or_else(|| ApiError::bad_request("JSON body required"))?;

    let lang = require_string(&payload, "lang")?;
    let greeting = require_string(&payload, "greeting")?;

    let mut greetings = state.greetings.write().await;
    greetings.insert(lang.to_string(), greeting.to_string());

    Ok(envelope::ok("POST Success", json!({ "greetings": &*greetings })))
}

fn require_string<'a>(payload: &'a Value, field: &str) -> Result<&'a str, ApiError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("{} is required", field)))
}
