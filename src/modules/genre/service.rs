use super::dto::{count_genres, GenreCount};
use crate::common::error::AppResult;
use crate::modules::movie::repository::MovieRepository;
use crate::state::AppState;

pub struct GenreService;

impl GenreService {
    pub async fn find_all(state: AppState) -> AppResult<Vec<GenreCount>> {
        let values = MovieRepository::genre_values(&state.db).await?;
        Ok(count_genres(values))
    }
}
