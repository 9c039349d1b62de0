use crate::state::AppState;
use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/movies", get(handler::list_movies))
        .route("/movies/{id}", get(handler::get_movie));

    let protected_routes = Router::new()
        .route("/admin/movies", post(handler::create_movie))
        .route(
            "/admin/movies/{id}",
            put(handler::update_movie).delete(handler::delete_movie),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ));

    public_routes.merge(protected_routes)
}
