use super::dto::{MovieDetailResponse, MovieFields, MovieWriteResponse, TrailerAttachment};
use super::model::Movie;
use super::repository::MovieRepository;
use crate::common::error::{AppError, AppResult};
use crate::modules::trailer::model::{NewTrailer, Trailer};
use crate::modules::trailer::repository::TrailerRepository;
use crate::state::AppState;
use sqlx::PgConnection;
use tracing::info;

pub struct MovieService;

impl MovieService {
    async fn attach_trailer(
        conn: &mut PgConnection,
        movie: &Movie,
        attachment: Option<TrailerAttachment>,
    ) -> AppResult<Option<Trailer>> {
        let Some(attachment) = attachment else {
            return Ok(None);
        };

        let trailer = NewTrailer {
            movie_id: movie.id,
            title: Some(format!("{} - Trailer", movie.title)),
            video_url: attachment.video_url,
            thumbnail_url: attachment.thumbnail_url,
        };
        let trailer = TrailerRepository::create(conn, &trailer).await?;
        info!("Trailer {} attached to movie {}", trailer.id, movie.id);
        Ok(Some(trailer))
    }

    /// Inserts the movie and, when a trailer URL came with it, its trailer in one transaction.
    pub async fn create(state: AppState, req: MovieFields) -> AppResult<MovieWriteResponse> {
        let new_movie = req.to_new_movie()?;

        let mut tx = state.db.begin().await?;
        let movie = MovieRepository::create(&mut *tx, &new_movie).await?;
        let trailer = Self::attach_trailer(&mut tx, &movie, req.trailer()).await?;
        tx.commit().await?;

        info!("Movie {} created: {}", movie.id, movie.title);
        Ok(MovieWriteResponse { movie, trailer })
    }

    pub async fn update(state: AppState, id: i64, req: MovieFields) -> AppResult<MovieWriteResponse> {
        let patch = req.to_patch()?;

        let mut tx = state.db.begin().await?;
        let movie = MovieRepository::update(&mut *tx, id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;
        let trailer = Self::attach_trailer(&mut tx, &movie, req.trailer()).await?;
        tx.commit().await?;

        info!("Movie {} updated", movie.id);
        Ok(MovieWriteResponse { movie, trailer })
    }

    /// Trailers go with the movie.
    pub async fn delete(state: AppState, id: i64) -> AppResult<()> {
        if !MovieRepository::delete(&state.db, id).await? {
            return Err(AppError::NotFound("Movie not found".to_string()));
        }
        info!("Movie {} deleted", id);
        Ok(())
    }

    pub async fn list(state: AppState, genre: Option<String>) -> AppResult<Vec<Movie>> {
        let genre = genre.as_deref().map(str::trim).filter(|g| !g.is_empty());
        Ok(MovieRepository::find_all(&state.db, genre).await?)
    }

    pub async fn get(state: AppState, id: i64) -> AppResult<MovieDetailResponse> {
        let movie = MovieRepository::find_by_id(&state.db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;
        let trailers = TrailerRepository::find_by_movie(&state.db, movie.id).await?;
        Ok(MovieDetailResponse { movie, trailers })
    }
}
