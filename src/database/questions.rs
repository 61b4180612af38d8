use sqlx::SqlitePool;

use crate::database::models::Question;
use crate::database::DatabaseError;

/// Fields required to insert a question.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: i64,
    pub category: i64,
}

pub struct QuestionRepository {
    pool: SqlitePool,
}

impl QuestionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Question>, DatabaseError> {
        let rows = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, difficulty, category FROM questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_category(&self, category: i64) -> Result<Vec<Question>, DatabaseError> {
        let rows = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, difficulty, category FROM questions \
             WHERE category = ? ORDER BY id",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Case-insensitive substring match over the question text.
    pub async fn search(&self, term: &str) -> Result<Vec<Question>, DatabaseError> {
        let rows = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, difficulty, category FROM questions \
             WHERE LOWER(question) LIKE '%' || LOWER(?) || '%' ORDER BY id",
        )
        .bind(term)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn create(&self, new: &NewQuestion) -> Result<Question, DatabaseError> {
        let row = sqlx::query_as::<_, Question>(
            "INSERT INTO questions (question, answer, difficulty, category) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, question, answer, difficulty, category",
        )
        .bind(&new.question)
        .bind(&new.answer)
        .bind(new.difficulty)
        .bind(new.category)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete by id, reporting whether a row was actually removed.
    pub async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
