use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub difficulty: i64,
    pub category: i64,
}

impl Question {
    /// Wire shape served by every questions endpoint.
    pub fn format(&self) -> Value {
        json!({
            "id": self.id,
            "question": self.question,
            "answer": self.answer,
            "difficulty": self.difficulty,
            "category": self.category,
        })
    }
}
