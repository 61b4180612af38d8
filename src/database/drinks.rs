use sqlx::SqlitePool;

use crate::database::models::Drink;
use crate::database::DatabaseError;

pub struct DrinkRepository {
    pool: SqlitePool,
}

impl DrinkRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Drink>, DatabaseError> {
        let rows = sqlx::query_as::<_, Drink>("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Drink>, DatabaseError> {
        let row = sqlx::query_as::<_, Drink>("SELECT id, title, recipe FROM drinks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// `recipe` must already be serialized JSON text.
    pub async fn create(&self, title: &str, recipe: &str) -> Result<Drink, DatabaseError> {
        let row = sqlx::query_as::<_, Drink>(
            "INSERT INTO drinks (title, recipe) VALUES (?, ?) RETURNING id, title, recipe",
        )
        .bind(title)
        .bind(recipe)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: i64,
        title: &str,
        recipe: &str,
    ) -> Result<Drink, DatabaseError> {
        let row = sqlx::query_as::<_, Drink>(
            "UPDATE drinks SET title = ?, recipe = ? WHERE id = ? \
             RETURNING id, title, recipe",
        )
        .bind(title)
        .bind(recipe)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("drink {} not found", id)))?;
        Ok(row)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
