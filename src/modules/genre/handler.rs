use super::dto::GenreCount;
use super::service::GenreService;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

/// List genres with the number of movies in each
#[utoipa::path(
    get,
    path = "/api/v1/genres",
    responses(
        (status = 200, description = "List of genres", body = ApiResponse<Vec<GenreCount>>)
    ),
    tag = "Movies"
)]
pub async fn list_genres(State(state): State<AppState>) -> impl IntoResponse {
    match GenreService::find_all(state).await {
        Ok(genres) => ApiSuccess(
            ApiResponse::success(genres, "Genres retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}
