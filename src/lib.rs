pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::handler::Handler;
use axum::routing::{delete, get, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenVerifier;
use crate::error::ApiError;
use crate::handlers::greetings::GreetingStore;
use crate::handlers::{booking, drinks, greetings, service, trivia};
use crate::middleware::permission_guard;

/// Shared application state: the connection pool, the in-process greeting
/// store and the configured bearer token verifier.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub greetings: GreetingStore,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(pool: SqlitePool, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { pool, greetings: greetings::seed_store(), verifier }
    }
}

/// Assemble the full application router. Tests drive this router directly;
/// `main` serves it.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(service::root))
        .route("/health", get(service::health))
        .merge(greeting_routes())
        .merge(trivia_routes())
        .merge(booking_routes())
        .merge(drink_routes(&state))
        .fallback(fallback)
        .layer(axum::middleware::from_fn(middleware::method_not_allowed_envelope))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn greeting_routes() -> Router<AppState> {
    Router::new()
        .route("/greeting", get(greetings::all).post(greetings::add))
        .route("/greeting/:lang", get(greetings::one))
}

fn trivia_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/questions",
            get(trivia::questions::list).post(trivia::questions::create_or_search),
        )
        .route("/questions/:id", delete(trivia::questions::delete))
        .route("/categories", get(trivia::categories::list))
        .route("/categories/:id/questions", get(trivia::categories::questions))
        .route("/quizzes", post(trivia::quizzes::play))
}

fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(booking::venues::list).post(booking::venues::create))
        .route("/venues/search", post(booking::venues::search))
        .route(
            "/venues/:id",
            get(booking::venues::detail)
                .put(booking::venues::update)
                .delete(booking::venues::delete),
        )
        .route("/artists", get(booking::artists::list).post(booking::artists::create))
        .route("/artists/search", post(booking::artists::search))
        .route(
            "/artists/:id",
            get(booking::artists::detail)
                .put(booking::artists::update)
                .delete(booking::artists::delete),
        )
        .route("/shows", get(booking::shows::list).post(booking::shows::create))
}

/// Coffee shop routes. Each protected handler is wrapped by the permission
/// gate middleware with the permission string that route requires.
fn drink_routes(state: &AppState) -> Router<AppState> {
    let guard = |permission: &'static str| {
        axum::middleware::from_fn_with_state((state.clone(), permission), permission_guard)
    };

    Router::new()
        .route(
            "/drinks",
            get(drinks::list).post(drinks::create.layer(guard("post:drinks"))),
        )
        .route("/drinks-detail", get(drinks::detail.layer(guard("get:drinks-detail"))))
        .route(
            "/drinks/:id",
            axum::routing::patch(drinks::update.layer(guard("patch:drinks")))
                .delete(drinks::delete.layer(guard("delete:drinks"))),
        )
}

async fn fallback() -> ApiError {
    ApiError::not_found("resource not found")
}
