use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Show joined with its artist, for venue detail pages.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShowWithArtist {
    pub id: i64,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Show joined with its venue, for artist detail pages.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShowWithVenue {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Show joined with both parents, for the global listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShowListing {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}
