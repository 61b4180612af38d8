use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

/// GET / - service index
pub async fn root() -> Json<serde_json::Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "status_code": 200,
        "message": "GET Success",
        "data": {
            "name": "Fullstack API (Rust)",
            "version": version,
            "endpoints": {
                "greetings": "/greeting[/:lang]",
                "trivia": "/questions, /categories[/:id/questions], /quizzes",
                "booking": "/venues, /artists, /shows (+ /search, /:id)",
                "drinks": "/drinks, /drinks-detail (bearer token + permissions)",
                "health": "/health",
            }
        }
    }))
}

/// GET /health - liveness plus a database ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "status_code": 200,
                "message": "GET Success",
                "data": { "status": "ok", "timestamp": now, "database": "ok" },
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "status_code": 503,
                "message": "database unavailable",
                "data": { "status": "degraded", "timestamp": now, "database_error": e.to_string() },
            })),
        ),
    }
}
