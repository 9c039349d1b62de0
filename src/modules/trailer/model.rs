use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Trailer {
    pub id: i64,
    pub movie_id: i64,
    pub title: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrailer {
    pub movie_id: i64,
    pub title: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
}
