use sqlx::SqlitePool;

use crate::database::models::Venue;
use crate::database::DatabaseError;

/// Mutable venue attributes; used for both insert and full update.
/// `genres` is the JSON-serialized list-of-genres string.
#[derive(Debug, Clone)]
pub struct VenueAttributes {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: String,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

pub struct VenueRepository {
    pool: SqlitePool,
}

impl VenueRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Venue>, DatabaseError> {
        let rows = sqlx::query_as::<_, Venue>("SELECT * FROM venues ORDER BY city, state, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Case-insensitive substring match on the venue name.
    pub async fn search(&self, term: &str) -> Result<Vec<Venue>, DatabaseError> {
        let rows = sqlx::query_as::<_, Venue>(
            "SELECT * FROM venues WHERE LOWER(name) LIKE '%' || LOWER(?) || '%' ORDER BY id",
        )
        .bind(term)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Venue>, DatabaseError> {
        let row = sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, attrs: &VenueAttributes) -> Result<Venue, DatabaseError> {
        let row = sqlx::query_as::<_, Venue>(
            "INSERT INTO venues \
             (name, city, state, address, phone, image_link, facebook_link, genres, website, \
              seeking_talent, seeking_description) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING *",
        )
        .bind(&attrs.name)
        .bind(&attrs.city)
        .bind(&attrs.state)
        .bind(&attrs.address)
        .bind(&attrs.phone)
        .bind(&attrs.image_link)
        .bind(&attrs.facebook_link)
        .bind(&attrs.genres)
        .bind(&attrs.website)
        .bind(attrs.seeking_talent)
        .bind(&attrs.seeking_description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i64, attrs: &VenueAttributes) -> Result<Venue, DatabaseError> {
        let row = sqlx::query_as::<_, Venue>(
            "UPDATE venues SET \
             name = ?, city = ?, state = ?, address = ?, phone = ?, image_link = ?, \
             facebook_link = ?, genres = ?, website = ?, seeking_talent = ?, \
             seeking_description = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(&attrs.name)
        .bind(&attrs.city)
        .bind(&attrs.state)
        .bind(&attrs.address)
        .bind(&attrs.phone)
        .bind(&attrs.image_link)
        .bind(&attrs.facebook_link)
        .bind(&attrs.genres)
        .bind(&attrs.website)
        .bind(attrs.seeking_talent)
        .bind(&attrs.seeking_description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("venue {} not found", id)))?;
        Ok(row)
    }

    /// Deletes the venue; the schema cascades the delete to its shows.
    pub async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM venues WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
