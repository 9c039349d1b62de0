use super::dto::{EmbedResponse, TrailerFields};
use super::model::Trailer;
use super::repository::TrailerRepository;
use crate::common::error::{AppError, AppResult};
use crate::common::video::resolve_embed;
use crate::modules::movie::repository::MovieRepository;
use crate::state::AppState;
use tracing::info;

pub struct TrailerService;

impl TrailerService {
    pub async fn create(state: AppState, req: TrailerFields) -> AppResult<Trailer> {
        let new_trailer = req.to_new_trailer()?;

        if MovieRepository::find_by_id(&state.db, new_trailer.movie_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Movie not found".to_string()));
        }

        let trailer = TrailerRepository::create(&state.db, &new_trailer).await?;
        info!("Trailer {} added to movie {}", trailer.id, trailer.movie_id);
        Ok(trailer)
    }

    pub async fn find_by_id(state: AppState, id: i64) -> AppResult<Trailer> {
        TrailerRepository::find_by_id(&state.db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trailer not found".to_string()))
    }

    pub async fn list_for_movie(state: AppState, movie_id: i64) -> AppResult<Vec<Trailer>> {
        if MovieRepository::find_by_id(&state.db, movie_id).await?.is_none() {
            return Err(AppError::NotFound("Movie not found".to_string()));
        }
        Ok(TrailerRepository::find_by_movie(&state.db, movie_id).await?)
    }

    pub async fn embed(state: AppState, id: i64) -> AppResult<EmbedResponse> {
        let trailer = Self::find_by_id(state, id).await?;
        let embed = resolve_embed(&trailer.video_url).ok_or_else(|| {
            AppError::Validation("Trailer video URL is not a recognised video link".to_string())
        })?;
        Ok(EmbedResponse::new(trailer.id, embed))
    }

    pub async fn delete(state: AppState, id: i64) -> AppResult<()> {
        if !TrailerRepository::delete(&state.db, id).await? {
            return Err(AppError::NotFound("Trailer not found".to_string()));
        }
        info!("Trailer {} deleted", id);
        Ok(())
    }
}
