use sqlx::SqlitePool;

use crate::database::models::Category;
use crate::database::DatabaseError;

pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Category>, DatabaseError> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Category>, DatabaseError> {
        let row = sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
