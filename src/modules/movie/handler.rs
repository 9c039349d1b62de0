use super::dto::{DeleteQuery, MovieDetailResponse, MovieFields, MovieListQuery, MovieWriteResponse};
use super::model::Movie;
use super::service::MovieService;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List movies, newest first
#[utoipa::path(
    get,
    path = "/api/v1/movies",
    params(MovieListQuery),
    responses(
        (status = 200, description = "List of movies", body = ApiResponse<Vec<Movie>>)
    ),
    tag = "Movies"
)]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<MovieListQuery>,
) -> impl IntoResponse {
    match MovieService::list(state, query.genre).await {
        Ok(movies) => ApiSuccess(
            ApiResponse::success(movies, "Movies retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get movie by ID with its trailers
#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}",
    params(("id" = i64, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie details", body = ApiResponse<MovieDetailResponse>),
        (status = 404, description = "Movie not found")
    ),
    tag = "Movies"
)]
pub async fn get_movie(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match MovieService::get(state, id).await {
        Ok(detail) => ApiSuccess(
            ApiResponse::success(detail, "Movie retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a movie
#[utoipa::path(
    post,
    path = "/api/v1/admin/movies",
    request_body = MovieFields,
    responses(
        (status = 201, description = "Movie created", body = ApiResponse<MovieWriteResponse>),
        (status = 400, description = "Title is required"),
        (status = 401, description = "Unauthorized")
    ),
    security(("session_cookie" = [])),
    tag = "Admin"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    Json(payload): Json<MovieFields>,
) -> impl IntoResponse {
    match MovieService::create(state, payload).await {
        Ok(created) => ApiSuccess(
            ApiResponse::success(created, "Movie created successfully"),
            StatusCode::CREATED,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a movie
#[utoipa::path(
    put,
    path = "/api/v1/admin/movies/{id}",
    params(("id" = i64, Path, description = "Movie ID")),
    request_body = MovieFields,
    responses(
        (status = 200, description = "Movie updated", body = ApiResponse<MovieWriteResponse>),
        (status = 400, description = "No fields to update"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Movie not found")
    ),
    security(("session_cookie" = [])),
    tag = "Admin"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MovieFields>,
) -> impl IntoResponse {
    match MovieService::update(state, id, payload).await {
        Ok(updated) => ApiSuccess(
            ApiResponse::success(updated, "Movie updated successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a movie and its trailers
#[utoipa::path(
    delete,
    path = "/api/v1/admin/movies/{id}",
    params(("id" = i64, Path, description = "Movie ID"), DeleteQuery),
    responses(
        (status = 200, description = "Movie deleted"),
        (status = 400, description = "Deletion not confirmed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Movie not found")
    ),
    security(("session_cookie" = [])),
    tag = "Admin"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DeleteQuery>,
) -> impl IntoResponse {
    if let Err(e) = query.require_confirmation("movie") {
        return e.into_response();
    }

    match MovieService::delete(state, id).await {
        Ok(()) => ApiSuccess(
            ApiResponse::success((), "Movie deleted successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}
