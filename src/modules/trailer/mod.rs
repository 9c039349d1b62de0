use crate::state::AppState;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/movies/{id}/trailers", get(handler::list_movie_trailers))
        .route("/trailers/{id}", get(handler::get_trailer))
        .route("/trailers/{id}/embed", get(handler::get_trailer_embed));

    let protected_routes = Router::new()
        .route("/admin/trailers", post(handler::create_trailer))
        .route("/admin/trailers/{id}", delete(handler::delete_trailer))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ));

    public_routes.merge(protected_routes)
}
