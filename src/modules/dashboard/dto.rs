use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub total_movies: i64,
    /// Movies whose release year is the current calendar year.
    pub movies_this_year: i64,
    pub genre_count: i64,
    pub database_connected: bool,
}
