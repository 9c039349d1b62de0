use crate::common::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    /// Comma-separated when a movie belongs to several genres.
    pub genre: Option<String>,
    pub director: Option<String>,
    pub poster_url: Option<String>,
    pub movie_file_url: Option<String>,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

/// A movie ready to be inserted; only constructed once the title is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub poster_url: Option<String>,
    pub movie_file_url: Option<String>,
}

/// Fields to change on an existing movie. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub poster_url: Option<String>,
    pub movie_file_url: Option<String>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.release_year.is_none()
            && self.genre.is_none()
            && self.director.is_none()
            && self.poster_url.is_none()
            && self.movie_file_url.is_none()
    }

    pub fn ensure_not_empty(self) -> AppResult<Self> {
        if self.is_empty() {
            return Err(AppError::Validation("No fields to update".to_string()));
        }
        Ok(self)
    }
}

/// Trimmed value, or `None` when blank.
pub fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
