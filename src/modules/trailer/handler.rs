use super::dto::{EmbedResponse, TrailerFields};
use super::model::Trailer;
use super::service::TrailerService;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::modules::movie::dto::DeleteQuery;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Trailers of a movie, newest first
#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}/trailers",
    params(("id" = i64, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Trailers of the movie", body = ApiResponse<Vec<Trailer>>),
        (status = 404, description = "Movie not found")
    ),
    tag = "Trailers"
)]
pub async fn list_movie_trailers(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> impl IntoResponse {
    match TrailerService::list_for_movie(state, movie_id).await {
        Ok(trailers) => ApiSuccess(
            ApiResponse::success(trailers, "Trailers retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get trailer by ID
#[utoipa::path(
    get,
    path = "/api/v1/trailers/{id}",
    params(("id" = i64, Path, description = "Trailer ID")),
    responses(
        (status = 200, description = "Trailer details", body = ApiResponse<Trailer>),
        (status = 404, description = "Trailer not found")
    ),
    tag = "Trailers"
)]
pub async fn get_trailer(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match TrailerService::find_by_id(state, id).await {
        Ok(trailer) => ApiSuccess(
            ApiResponse::success(trailer, "Trailer retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Player URL for a trailer
#[utoipa::path(
    get,
    path = "/api/v1/trailers/{id}/embed",
    params(("id" = i64, Path, description = "Trailer ID")),
    responses(
        (status = 200, description = "Embeddable URL", body = ApiResponse<EmbedResponse>),
        (status = 400, description = "Unrecognised video link"),
        (status = 404, description = "Trailer not found")
    ),
    tag = "Trailers"
)]
pub async fn get_trailer_embed(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match TrailerService::embed(state, id).await {
        Ok(embed) => ApiSuccess(
            ApiResponse::success(embed, "Embed URL resolved"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Add a trailer to a movie
#[utoipa::path(
    post,
    path = "/api/v1/admin/trailers",
    request_body = TrailerFields,
    responses(
        (status = 201, description = "Trailer created", body = ApiResponse<Trailer>),
        (status = 400, description = "Movie ID and video URL are required"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Movie not found")
    ),
    security(("session_cookie" = [])),
    tag = "Admin"
)]
pub async fn create_trailer(
    State(state): State<AppState>,
    Json(payload): Json<TrailerFields>,
) -> impl IntoResponse {
    match TrailerService::create(state, payload).await {
        Ok(trailer) => ApiSuccess(
            ApiResponse::success(trailer, "Trailer created successfully"),
            StatusCode::CREATED,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a trailer
#[utoipa::path(
    delete,
    path = "/api/v1/admin/trailers/{id}",
    params(("id" = i64, Path, description = "Trailer ID"), DeleteQuery),
    responses(
        (status = 200, description = "Trailer deleted"),
        (status = 400, description = "Deletion not confirmed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Trailer not found")
    ),
    security(("session_cookie" = [])),
    tag = "Admin"
)]
pub async fn delete_trailer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DeleteQuery>,
) -> impl IntoResponse {
    if let Err(e) = query.require_confirmation("trailer") {
        return e.into_response();
    }

    match TrailerService::delete(state, id).await {
        Ok(()) => ApiSuccess(
            ApiResponse::success((), "Trailer deleted successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}
