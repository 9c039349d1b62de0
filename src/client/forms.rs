use crate::client::error::ClientError;
use crate::client::gateway::RecordGateway;
use crate::modules::movie::dto::{MovieFields, MovieWriteResponse};
use crate::modules::movie::model::Movie;
use crate::modules::trailer::dto::TrailerFields;
use crate::modules::trailer::model::Trailer;
use tracing::info;

/// Form field an upload session fills in once it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSlot {
    MovieFile,
    Poster,
    TrailerVideo,
    TrailerThumbnail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone)]
pub enum FormOutcome {
    Created(MovieWriteResponse),
    Updated(MovieWriteResponse),
}

impl FormOutcome {
    pub fn movie(&self) -> &Movie {
        match self {
            FormOutcome::Created(written) | FormOutcome::Updated(written) => &written.movie,
        }
    }
}

/// Collects movie fields and upload URLs, then issues one create or update.
#[derive(Debug, Clone)]
pub struct MovieForm {
    mode: FormMode,
    pub fields: MovieFields,
}

impl Default for MovieForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            fields: MovieFields::default(),
        }
    }

    /// Starts from the movie's current values.
    pub fn edit(movie: &Movie) -> Self {
        Self {
            mode: FormMode::Edit(movie.id),
            fields: MovieFields {
                title: Some(movie.title.clone()),
                description: movie.description.clone(),
                release_year: movie.release_year,
                genre: movie.genre.clone(),
                director: movie.director.clone(),
                poster_url: movie.poster_url.clone(),
                movie_file_url: movie.movie_file_url.clone(),
                trailer_url: None,
                thumbnail_url: None,
            },
        }
    }

    /// Edits only the given fields of a movie that was not loaded.
    pub fn patch(id: i64) -> Self {
        Self {
            mode: FormMode::Edit(id),
            fields: MovieFields::default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn attach_upload(&mut self, slot: UploadSlot, url: impl Into<String>) {
        let url = Some(url.into());
        match slot {
            UploadSlot::MovieFile => self.fields.movie_file_url = url,
            UploadSlot::Poster => self.fields.poster_url = url,
            UploadSlot::TrailerVideo => self.fields.trailer_url = url,
            UploadSlot::TrailerThumbnail => self.fields.thumbnail_url = url,
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let checked = match self.mode {
            FormMode::Create => self.fields.to_new_movie().map(|_| ()),
            FormMode::Edit(_) => self.fields.to_patch().map(|_| ()),
        };
        checked.map_err(|e| ClientError::Validation(e.to_string()))
    }

    /// Store errors come back untouched for the form to show.
    pub async fn submit<G>(&self, gateway: &G) -> Result<FormOutcome, ClientError>
    where
        G: RecordGateway + ?Sized,
    {
        self.validate()?;

        let outcome = match self.mode {
            FormMode::Create => FormOutcome::Created(gateway.create_movie(&self.fields).await?),
            FormMode::Edit(id) => FormOutcome::Updated(gateway.update_movie(id, &self.fields).await?),
        };
        info!("Movie {} saved", outcome.movie().id);
        Ok(outcome)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrailerForm {
    pub fields: TrailerFields,
}

impl TrailerForm {
    pub fn for_movie(movie_id: i64) -> Self {
        Self {
            fields: TrailerFields {
                movie_id: Some(movie_id),
                ..Default::default()
            },
        }
    }

    pub fn attach_upload(&mut self, slot: UploadSlot, url: impl Into<String>) {
        let url = Some(url.into());
        match slot {
            UploadSlot::TrailerThumbnail | UploadSlot::Poster => self.fields.thumbnail_url = url,
            UploadSlot::TrailerVideo | UploadSlot::MovieFile => self.fields.video_url = url,
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        self.fields
            .to_new_trailer()
            .map(|_| ())
            .map_err(|e| ClientError::Validation(e.to_string()))
    }

    pub async fn submit<G>(&self, gateway: &G) -> Result<Trailer, ClientError>
    where
        G: RecordGateway + ?Sized,
    {
        self.validate()?;
        let trailer = gateway.create_trailer(&self.fields).await?;
        info!("Trailer {} saved for movie {}", trailer.id, trailer.movie_id);
        Ok(trailer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::gateway::EntityKind;
    use crate::modules::movie::dto::MovieDetailResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use time::OffsetDateTime;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        CreateMovie(MovieFields),
        UpdateMovie(i64, MovieFields),
        CreateTrailer(TrailerFields),
    }

    #[derive(Default)]
    struct RecordingGateway {
        calls: Mutex<Vec<Call>>,
        fail_with: Option<String>,
    }

    impl RecordingGateway {
        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) -> Result<(), ClientError> {
            self.calls.lock().unwrap().push(call);
            match &self.fail_with {
                Some(message) => Err(ClientError::Api {
                    status: 500,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    fn movie(id: i64, fields: &MovieFields) -> Movie {
        let now = OffsetDateTime::now_utc();
        Movie {
            id,
            title: fields.title.clone().unwrap_or_default(),
            description: fields.description.clone(),
            release_year: fields.release_year,
            genre: fields.genre.clone(),
            director: fields.director.clone(),
            poster_url: fields.poster_url.clone(),
            movie_file_url: fields.movie_file_url.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    #[async_trait]
    impl RecordGateway for RecordingGateway {
        async fn create_movie(&self, fields: &MovieFields) -> Result<MovieWriteResponse, ClientError> {
            self.record(Call::CreateMovie(fields.clone()))?;
            Ok(MovieWriteResponse {
                movie: movie(1, fields),
                trailer: None,
            })
        }

        async fn update_movie(
            &self,
            id: i64,
            fields: &MovieFields,
        ) -> Result<MovieWriteResponse, ClientError> {
            self.record(Call::UpdateMovie(id, fields.clone()))?;
            Ok(MovieWriteResponse {
                movie: movie(id, fields),
                trailer: None,
            })
        }

        async fn create_trailer(&self, fields: &TrailerFields) -> Result<Trailer, ClientError> {
            self.record(Call::CreateTrailer(fields.clone()))?;
            Ok(Trailer {
                id: 7,
                movie_id: fields.movie_id.unwrap_or_default(),
                title: fields.title.clone(),
                video_url: fields.video_url.clone().unwrap_or_default(),
                thumbnail_url: fields.thumbnail_url.clone(),
                created_at: OffsetDateTime::now_utc(),
            })
        }

        async fn delete(&self, _kind: EntityKind, _id: i64) -> Result<(), ClientError> {
            unimplemented!("forms never delete")
        }

        async fn list_movies(&self, _genre: Option<&str>) -> Result<Vec<Movie>, ClientError> {
            Ok(Vec::new())
        }

        async fn get_movie(&self, _id: i64) -> Result<Option<MovieDetailResponse>, ClientError> {
            Ok(None)
        }

        async fn get_trailer(&self, _id: i64) -> Result<Option<Trailer>, ClientError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn missing_title_never_reaches_the_gateway() {
        let gateway = RecordingGateway::default();
        let mut form = MovieForm::new();
        form.fields.title = Some("   ".into());
        form.attach_upload(UploadSlot::MovieFile, "/uploads/movies/a.mp4");

        let err = form.submit(&gateway).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(err.to_string(), "Title is required");
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn create_sends_the_collected_fields_once() {
        let gateway = RecordingGateway::default();
        let mut form = MovieForm::new();
        form.fields.title = Some("Alien".into());
        form.fields.genre = Some("Horror, Sci-Fi".into());
        form.attach_upload(UploadSlot::MovieFile, "/uploads/movies/a.mp4");
        form.attach_upload(UploadSlot::TrailerVideo, "/uploads/trailers/t.mp4");

        let outcome = form.submit(&gateway).await.unwrap();
        assert!(matches!(outcome, FormOutcome::Created(_)));
        assert_eq!(outcome.movie().movie_file_url.as_deref(), Some("/uploads/movies/a.mp4"));

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        let Call::CreateMovie(sent) = &calls[0] else {
            panic!("expected a create, got {:?}", calls[0]);
        };
        assert_eq!(sent.trailer_url.as_deref(), Some("/uploads/trailers/t.mp4"));
    }

    #[tokio::test]
    async fn edit_updates_the_loaded_movie() {
        let gateway = RecordingGateway::default();
        let existing = movie(42, &MovieFields {
            title: Some("Heat".into()),
            ..Default::default()
        });
        let mut form = MovieForm::edit(&existing);
        form.attach_upload(UploadSlot::Poster, "/uploads/thumbnails/p.png");

        let outcome = form.submit(&gateway).await.unwrap();
        assert!(matches!(outcome, FormOutcome::Updated(_)));
        match &gateway.calls()[0] {
            Call::UpdateMovie(42, fields) => {
                assert_eq!(fields.poster_url.as_deref(), Some("/uploads/thumbnails/p.png"));
                assert_eq!(fields.title.as_deref(), Some("Heat"));
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_patch_is_rejected_locally() {
        let gateway = RecordingGateway::default();
        let err = MovieForm::patch(3).submit(&gateway).await.unwrap_err();
        assert_eq!(err.to_string(), "No fields to update");
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn store_errors_surface_verbatim() {
        let gateway = RecordingGateway::failing("duplicate key value violates unique constraint");
        let mut form = MovieForm::new();
        form.fields.title = Some("Alien".into());

        let err = form.submit(&gateway).await.unwrap_err();
        assert_eq!(err.to_string(), "duplicate key value violates unique constraint");
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn trailer_form_requires_a_video() {
        let gateway = RecordingGateway::default();
        let mut form = TrailerForm::for_movie(5);
        assert_eq!(
            form.submit(&gateway).await.unwrap_err().to_string(),
            "Movie ID and video URL are required"
        );
        assert!(gateway.calls().is_empty());

        form.attach_upload(UploadSlot::TrailerVideo, "/uploads/trailers/t.mp4");
        form.attach_upload(UploadSlot::TrailerThumbnail, "/uploads/thumbnails/t.png");
        let trailer = form.submit(&gateway).await.unwrap();
        assert_eq!(trailer.movie_id, 5);
        assert_eq!(trailer.thumbnail_url.as_deref(), Some("/uploads/thumbnails/t.png"));
    }
}
