use super::model::{Movie, MoviePatch, NewMovie};
use sqlx::postgres::PgExecutor;
use sqlx::{PgPool, Postgres, QueryBuilder};

const MOVIE_COLUMNS: &str = "id, title, description, release_year, genre, director, poster_url, movie_file_url, created_at, updated_at";

pub struct MovieRepository;

impl MovieRepository {
    pub async fn create<'e, E>(executor: E, movie: &NewMovie) -> Result<Movie, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            r#"
            INSERT INTO movies (title, description, release_year, genre, director, poster_url, movie_file_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            MOVIE_COLUMNS
        );

        sqlx::query_as::<_, Movie>(&query)
            .bind(&movie.title)
            .bind(&movie.description)
            .bind(movie.release_year)
            .bind(&movie.genre)
            .bind(&movie.director)
            .bind(&movie.poster_url)
            .bind(&movie.movie_file_url)
            .fetch_one(executor)
            .await
    }

    /// Only the columns present in the patch are written.
    pub async fn update<'e, E>(
        executor: E,
        id: i64,
        patch: &MoviePatch,
    ) -> Result<Option<Movie>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE movies SET ");
        {
            let mut set = builder.separated(", ");
            if let Some(title) = &patch.title {
                set.push("title = ").push_bind_unseparated(title.clone());
            }
            if let Some(description) = &patch.description {
                set.push("description = ").push_bind_unseparated(description.clone());
            }
            if let Some(release_year) = patch.release_year {
                set.push("release_year = ").push_bind_unseparated(release_year);
            }
            if let Some(genre) = &patch.genre {
                set.push("genre = ").push_bind_unseparated(genre.clone());
            }
            if let Some(director) = &patch.director {
                set.push("director = ").push_bind_unseparated(director.clone());
            }
            if let Some(poster_url) = &patch.poster_url {
                set.push("poster_url = ").push_bind_unseparated(poster_url.clone());
            }
            if let Some(movie_file_url) = &patch.movie_file_url {
                set.push("movie_file_url = ").push_bind_unseparated(movie_file_url.clone());
            }
            set.push("updated_at = NOW()");
        }
        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(MOVIE_COLUMNS);

        builder.build_query_as::<Movie>().fetch_optional(executor).await
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Movie>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {} FROM movies WHERE id = $1", MOVIE_COLUMNS);
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Newest first. The genre filter matches any entry of the comma-separated list.
    pub async fn find_all(pool: &PgPool, genre: Option<&str>) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {}
            FROM movies
            WHERE $1::text IS NULL
               OR EXISTS (
                    SELECT 1
                    FROM unnest(string_to_array(genre, ',')) AS g(name)
                    WHERE lower(trim(g.name)) = lower(trim($1))
               )
            ORDER BY created_at DESC
            "#,
            MOVIE_COLUMNS
        );

        sqlx::query_as::<_, Movie>(&query)
            .bind(genre)
            .fetch_all(pool)
            .await
    }

    pub async fn genre_values(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT genre FROM movies WHERE genre IS NOT NULL AND genre <> ''",
        )
        .fetch_all(pool)
        .await
    }

    /// (total movies, movies released in `year`)
    pub async fn counts(pool: &PgPool, year: i32) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE release_year = $1)
            FROM movies
            "#,
        )
        .bind(year)
        .fetch_one(pool)
        .await
    }
}
