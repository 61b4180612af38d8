use sqlx::SqlitePool;

use crate::database::models::Artist;
use crate::database::DatabaseError;

/// Mutable artist attributes; used for both insert and full update.
#[derive(Debug, Clone)]
pub struct ArtistAttributes {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: String,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

pub struct ArtistRepository {
    pool: SqlitePool,
}

impl ArtistRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Artist>, DatabaseError> {
        let rows = sqlx::query_as::<_, Artist>("SELECT * FROM artists ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Artist>, DatabaseError> {
        let rows = sqlx::query_as::<_, Artist>(
            "SELECT * FROM artists WHERE LOWER(name) LIKE '%' || LOWER(?) || '%' ORDER BY id",
        )
        .bind(term)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Artist>, DatabaseError> {
        let row = sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, attrs: &ArtistAttributes) -> Result<Artist, DatabaseError> {
        let row = sqlx::query_as::<_, Artist>(
            "INSERT INTO artists \
             (name, city, state, phone, image_link, facebook_link, genres, website, \
              seeking_venue, seeking_description) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING *",
        )
        .bind(&attrs.name)
        .bind(&attrs.city)
        .bind(&attrs.state)
        .bind(&attrs.phone)
        .bind(&attrs.image_link)
        .bind(&attrs.facebook_link)
        .bind(&attrs.genres)
        .bind(&attrs.website)
        .bind(attrs.seeking_venue)
        .bind(&attrs.seeking_description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i64, attrs: &ArtistAttributes) -> Result<Artist, DatabaseError> {
        let row = sqlx::query_as::<_, Artist>(
            "UPDATE artists SET \
             name = ?, city = ?, state = ?, phone = ?, image_link = ?, facebook_link = ?, \
             genres = ?, website = ?, seeking_venue = ?, seeking_description = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(&attrs.name)
        .bind(&attrs.city)
        .bind(&attrs.state)
        .bind(&attrs.phone)
        .bind(&attrs.image_link)
        .bind(&attrs.facebook_link)
        .bind(&attrs.genres)
        .bind(&attrs.website)
        .bind(attrs.seeking_venue)
        .bind(&attrs.seeking_description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("artist {} not found", id)))?;
        Ok(row)
    }

    /// Deletes the artist; the schema cascades the delete to its shows.
    pub async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM artists WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
