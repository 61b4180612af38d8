use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::database::models::{Show, ShowListing, ShowWithArtist, ShowWithVenue};
use crate::database::DatabaseError;

pub struct ShowRepository {
    pool: SqlitePool,
}

impl ShowRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<ShowListing>, DatabaseError> {
        let rows = sqlx::query_as::<_, ShowListing>(
            "SELECT s.id, s.venue_id, v.name AS venue_name, \
                    s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link, \
                    s.start_time \
             FROM shows s \
             JOIN venues v ON v.id = s.venue_id \
             JOIN artists a ON a.id = s.artist_id \
             ORDER BY s.start_time",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn for_venue(&self, venue_id: i64) -> Result<Vec<ShowWithArtist>, DatabaseError> {
        let rows = sqlx::query_as::<_, ShowWithArtist>(
            "SELECT s.id, s.artist_id, a.name AS artist_name, \
                    a.image_link AS artist_image_link, s.start_time \
             FROM shows s JOIN artists a ON a.id = s.artist_id \
             WHERE s.venue_id = ? ORDER BY s.start_time",
        )
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn for_artist(&self, artist_id: i64) -> Result<Vec<ShowWithVenue>, DatabaseError> {
        let rows = sqlx::query_as::<_, ShowWithVenue>(
            "SELECT s.id, s.venue_id, v.name AS venue_name, \
                    v.image_link AS venue_image_link, s.start_time \
             FROM shows s JOIN venues v ON v.id = s.venue_id \
             WHERE s.artist_id = ? ORDER BY s.start_time",
        )
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a show. A venue or artist id that references no parent row is
    /// rejected by the database's foreign key check.
    pub async fn create(
        &self,
        venue_id: i64,
        artist_id: i64,
        start_time: DateTime<Utc>,
    ) -> Result<Show, DatabaseError> {
        let row = sqlx::query_as::<_, Show>(
            "INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?, ?, ?) \
             RETURNING id, venue_id, artist_id, start_time",
        )
        .bind(venue_id)
        .bind(artist_id)
        .bind(start_time)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
