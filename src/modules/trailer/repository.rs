use super::model::{NewTrailer, Trailer};
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;

const TRAILER_COLUMNS: &str = "id, movie_id, title, video_url, thumbnail_url, created_at";

pub struct TrailerRepository;

impl TrailerRepository {
    pub async fn create<'e, E>(executor: E, trailer: &NewTrailer) -> Result<Trailer, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            r#"
            INSERT INTO trailers (movie_id, title, video_url, thumbnail_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            TRAILER_COLUMNS
        );

        sqlx::query_as::<_, Trailer>(&query)
            .bind(trailer.movie_id)
            .bind(&trailer.title)
            .bind(&trailer.video_url)
            .bind(&trailer.thumbnail_url)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Trailer>, sqlx::Error> {
        let query = format!("SELECT {} FROM trailers WHERE id = $1", TRAILER_COLUMNS);
        sqlx::query_as::<_, Trailer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_movie(pool: &PgPool, movie_id: i64) -> Result<Vec<Trailer>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM trailers WHERE movie_id = $1 ORDER BY created_at DESC",
            TRAILER_COLUMNS
        );
        sqlx::query_as::<_, Trailer>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trailers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
