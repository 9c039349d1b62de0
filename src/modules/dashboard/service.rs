use super::dto::DashboardStats;
use crate::common::error::AppResult;
use crate::infrastructure::db::pool::ping;
use crate::modules::genre::dto::count_genres;
use crate::modules::movie::repository::MovieRepository;
use crate::state::AppState;
use time::OffsetDateTime;

pub struct DashboardService;

impl DashboardService {
    pub async fn stats(state: AppState) -> AppResult<DashboardStats> {
        let year = OffsetDateTime::now_utc().year();
        let (total_movies, movies_this_year) = MovieRepository::counts(&state.db, year).await?;
        let genres = count_genres(MovieRepository::genre_values(&state.db).await?);

        Ok(DashboardStats {
            total_movies,
            movies_this_year,
            genre_count: genres.len() as i64,
            database_connected: ping(&state.db).await,
        })
    }
}
