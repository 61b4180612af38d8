use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// Collapse categories into the `{id: type}` map the trivia frontend expects.
pub fn simplify(categories: &[Category]) -> Value {
    let mut map = Map::new();
    for category in categories {
        map.insert(category.id.to_string(), Value::String(category.kind.clone()));
    }
    Value::Object(map)
}
