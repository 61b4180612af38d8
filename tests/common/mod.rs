//! Shared helpers for the integration tests: an in-process app over an
//! in-memory SQLite pool, request plumbing and token minting.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Map, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use fullstack_api::auth::SharedSecretVerifier;
use fullstack_api::{app, database, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Build the router over a fresh in-memory database. A single connection
/// keeps every query in the test on the same SQLite instance.
pub async fn test_app() -> (Router, SqlitePool) {
    let pool = database::connect("sqlite::memory:", 1)
        .await
        .expect("in-memory pool");
    database::migrate(&pool).await.expect("migrations");

    let verifier = Arc::new(SharedSecretVerifier::new(TEST_SECRET));
    let state = AppState::new(pool.clone(), verifier);
    (app(state), pool)
}

pub async fn request(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    request(app, Method::GET, path, None, None).await
}

pub async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    request(app, Method::POST, path, Some(body), None).await
}

pub async fn delete(app: &Router, path: &str) -> (StatusCode, Value) {
    request(app, Method::DELETE, path, None, None).await
}

/// Mint an HS256 token the test verifier accepts. `permissions: None`
/// omits the claim entirely.
pub fn mint_token(permissions: Option<Vec<&str>>) -> String {
    let now = chrono::Utc::now().timestamp();
    let mut claims = Map::new();
    claims.insert("exp".into(), json!(now + 3600));
    claims.insert("iat".into(), json!(now));
    claims.insert("sub".into(), json!("integration-tests"));
    if let Some(permissions) = permissions {
        claims.insert("permissions".into(), json!(permissions));
    }

    encode(
        &Header::default(),
        &Value::Object(claims),
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub async fn seed_category(pool: &SqlitePool, kind: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (type) VALUES (?) RETURNING id")
        .bind(kind)
        .fetch_one(pool)
        .await
        .expect("seed category")
}

pub async fn seed_question(
    pool: &SqlitePool,
    question: &str,
    answer: &str,
    category: i64,
    difficulty: i64,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO questions (question, answer, category, difficulty) \
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(question)
    .bind(answer)
    .bind(category)
    .bind(difficulty)
    .fetch_one(pool)
    .await
    .expect("seed question")
}

/// Seed two categories and `per_category` questions in each; returns the
/// category ids.
pub async fn seed_trivia(pool: &SqlitePool, per_category: usize) -> (i64, i64) {
    let science = seed_category(pool, "Science").await;
    let history = seed_category(pool, "History").await;
    for i in 0..per_category {
        seed_question(pool, &format!("Science question {i}"), "because", science, 2).await;
        seed_question(pool, &format!("History question {i}"), "long ago", history, 3).await;
    }
    (science, history)
}

pub async fn seed_drink(pool: &SqlitePool, title: &str, recipe: Value) -> i64 {
    sqlx::query_scalar("INSERT INTO drinks (title, recipe) VALUES (?, ?) RETURNING id")
        .bind(title)
        .bind(recipe.to_string())
        .fetch_one(pool)
        .await
        .expect("seed drink")
}
