use crate::client::error::ClientError;
use crate::modules::movie::dto::{MovieDetailResponse, MovieFields, MovieWriteResponse};
use crate::modules::movie::model::Movie;
use crate::modules::trailer::dto::TrailerFields;
use crate::modules::trailer::model::Trailer;
use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Movie,
    Trailer,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Movie => f.write_str("movie"),
            EntityKind::Trailer => f.write_str("trailer"),
        }
    }
}

/// The movie and trailer catalog as seen by the back-office forms.
/// Errors are surfaced as returned, never retried.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    async fn create_movie(&self, fields: &MovieFields) -> Result<MovieWriteResponse, ClientError>;

    async fn update_movie(
        &self,
        id: i64,
        fields: &MovieFields,
    ) -> Result<MovieWriteResponse, ClientError>;

    async fn create_trailer(&self, fields: &TrailerFields) -> Result<Trailer, ClientError>;

    async fn delete(&self, kind: EntityKind, id: i64) -> Result<(), ClientError>;

    async fn list_movies(&self, genre: Option<&str>) -> Result<Vec<Movie>, ClientError>;

    async fn get_movie(&self, id: i64) -> Result<Option<MovieDetailResponse>, ClientError>;

    async fn get_trailer(&self, id: i64) -> Result<Option<Trailer>, ClientError>;
}
