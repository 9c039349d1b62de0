use super::model::NewTrailer;
use crate::common::error::{AppError, AppResult};
use crate::common::video::Embed;
use crate::modules::movie::model::present;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrailerFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl TrailerFields {
    pub fn to_new_trailer(&self) -> AppResult<NewTrailer> {
        let movie_id = self.movie_id.filter(|id| *id > 0);
        match (movie_id, present(&self.video_url)) {
            (Some(movie_id), Some(video_url)) => Ok(NewTrailer {
                movie_id,
                title: present(&self.title),
                video_url,
                thumbnail_url: present(&self.thumbnail_url),
            }),
            _ => Err(AppError::Validation(
                "Movie ID and video URL are required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmbedResponse {
    pub trailer_id: i64,
    pub url: String,
    pub direct: bool,
}

impl EmbedResponse {
    pub fn new(trailer_id: i64, embed: Embed) -> Self {
        Self {
            trailer_id,
            url: embed.url,
            direct: embed.direct,
        }
    }
}
