pub mod artists;
pub mod categories;
pub mod drinks;
pub mod models;
pub mod questions;
pub mod shows;
pub mod venues;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

/// Errors surfaced by the repository layer.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Open the connection pool. Foreign keys are enforced on every connection
/// so invalid references are rejected by the database, not discovered later.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, DatabaseError> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!("opened database pool for {}", url);
    Ok(pool)
}

/// Create all tables if they do not exist yet. Safe to run on every startup.
pub async fn migrate(pool: &SqlitePool) -> Result<(), DatabaseError> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS categories (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            type TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS questions (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            question   TEXT    NOT NULL,
            answer     TEXT    NOT NULL,
            difficulty INTEGER NOT NULL,
            category   INTEGER NOT NULL REFERENCES categories(id)
        )",
        "CREATE TABLE IF NOT EXISTS venues (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            name                TEXT    NOT NULL UNIQUE,
            city                TEXT    NOT NULL,
            state               TEXT    NOT NULL,
            address             TEXT    NOT NULL,
            phone               TEXT,
            image_link          TEXT,
            facebook_link       TEXT,
            genres              TEXT    NOT NULL,
            website             TEXT,
            seeking_talent      BOOLEAN NOT NULL DEFAULT 0,
            seeking_description TEXT
        )",
        "CREATE TABLE IF NOT EXISTS artists (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            name                TEXT    NOT NULL UNIQUE,
            city                TEXT    NOT NULL,
            state               TEXT    NOT NULL,
            phone               TEXT,
            image_link          TEXT,
            facebook_link       TEXT,
            genres              TEXT    NOT NULL,
            website             TEXT,
            seeking_venue       BOOLEAN NOT NULL DEFAULT 0,
            seeking_description TEXT
        )",
        "CREATE TABLE IF NOT EXISTS shows (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            venue_id   INTEGER NOT NULL REFERENCES venues(id)  ON DELETE CASCADE,
            artist_id  INTEGER NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
            start_time TEXT    NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS drinks (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            title  TEXT NOT NULL UNIQUE,
            recipe TEXT NOT NULL
        )",
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
