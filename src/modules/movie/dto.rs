use super::model::{present, Movie, MoviePatch, NewMovie};
use crate::common::error::{AppError, AppResult};
use crate::modules::trailer::model::Trailer;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Body of both the create and the update request for a movie.
/// `trailer_url`/`thumbnail_url` attach a new trailer to the movie in the same request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct MovieFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1870, max = 2200, message = "Release year must be a valid year"))]
    pub release_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailerAttachment {
    pub video_url: String,
    pub thumbnail_url: Option<String>,
}

impl MovieFields {
    pub fn to_new_movie(&self) -> AppResult<NewMovie> {
        self.validate()?;
        let title = present(&self.title)
            .ok_or_else(|| AppError::Validation("Title is required".to_string()))?;

        Ok(NewMovie {
            title,
            description: present(&self.description),
            release_year: self.release_year,
            genre: present(&self.genre),
            director: present(&self.director),
            poster_url: present(&self.poster_url),
            movie_file_url: present(&self.movie_file_url),
        })
    }

    pub fn to_patch(&self) -> AppResult<MoviePatch> {
        self.validate()?;
        MoviePatch {
            title: present(&self.title),
            description: present(&self.description),
            release_year: self.release_year,
            genre: present(&self.genre),
            director: present(&self.director),
            poster_url: present(&self.poster_url),
            movie_file_url: present(&self.movie_file_url),
        }
        .ensure_not_empty()
    }

    pub fn trailer(&self) -> Option<TrailerAttachment> {
        present(&self.trailer_url).map(|video_url| TrailerAttachment {
            video_url,
            thumbnail_url: present(&self.thumbnail_url),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovieListQuery {
    /// Only movies listing this genre.
    pub genre: Option<String>,
}

/// Deletes are refused unless the caller confirmed them.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

impl DeleteQuery {
    pub fn require_confirmation(&self, what: &str) -> AppResult<()> {
        if !self.confirm {
            return Err(AppError::Validation(format!(
                "Deleting a {} must be confirmed with ?confirm=true",
                what
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovieWriteResponse {
    pub movie: Movie,
    /// Trailer created from `trailer_url`, when one was attached.
    pub trailer: Option<Trailer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovieDetailResponse {
    pub movie: Movie,
    pub trailers: Vec<Trailer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> MovieFields {
        MovieFields {
            title: Some("  Alien ".into()),
            genre: Some("Horror, Sci-Fi".into()),
            description: Some("".into()),
            ..Default::default()
        }
    }

    #[test]
    fn new_movie_requires_a_title() {
        let mut f = fields();
        f.title = Some("   ".into());
        let err = f.to_new_movie().unwrap_err();
        assert_eq!(err.to_string(), "Title is required");

        f.title = None;
        assert!(matches!(f.to_new_movie(), Err(AppError::Validation(_))));
    }

    #[test]
    fn new_movie_trims_and_drops_blank_fields() {
        let movie = fields().to_new_movie().unwrap();
        assert_eq!(movie.title, "Alien");
        assert_eq!(movie.description, None);
        assert_eq!(movie.genre.as_deref(), Some("Horror, Sci-Fi"));
    }

    #[test]
    fn patch_needs_at_least_one_field() {
        let empty = MovieFields {
            description: Some(" ".into()),
            trailer_url: Some("/uploads/trailers/t.mp4".into()),
            ..Default::default()
        };
        assert_eq!(empty.to_patch().unwrap_err().to_string(), "No fields to update");

        let patch = MovieFields {
            release_year: Some(1979),
            ..Default::default()
        }
        .to_patch()
        .unwrap();
        assert_eq!(patch.release_year, Some(1979));
        assert!(patch.title.is_none());
    }

    #[test]
    fn release_year_is_range_checked() {
        let f = MovieFields {
            title: Some("Alien".into()),
            release_year: Some(12),
            ..Default::default()
        };
        assert_eq!(
            f.to_new_movie().unwrap_err().to_string(),
            "Release year must be a valid year"
        );
    }

    #[test]
    fn trailer_attachment_needs_a_video_url() {
        let mut f = fields();
        f.thumbnail_url = Some("/uploads/thumbnails/t.png".into());
        assert_eq!(f.trailer(), None);

        f.trailer_url = Some("https://youtu.be/dQw4w9WgXcQ".into());
        assert_eq!(
            f.trailer(),
            Some(TrailerAttachment {
                video_url: "https://youtu.be/dQw4w9WgXcQ".into(),
                thumbnail_url: Some("/uploads/thumbnails/t.png".into()),
            })
        );
    }

    #[test]
    fn deletes_need_confirmation() {
        assert!(DeleteQuery::default().require_confirmation("movie").is_err());
        assert!(DeleteQuery { confirm: true }.require_confirmation("movie").is_ok());
    }
}
