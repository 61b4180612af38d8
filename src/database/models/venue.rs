use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A venue row. Genres are stored as a JSON-serialized list of strings in a
/// single text column and decoded at the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i64,
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

impl Venue {
    pub fn genre_list(&self) -> Vec<String> {
        serde_json::from_str(&self.genres).unwrap_or_default()
    }
}
