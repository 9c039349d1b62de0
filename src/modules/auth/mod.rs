use crate::state::AppState;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new().route("/auth/login", post(handler::login));

    let protected_routes = Router::new()
        .route("/auth/logout", post(handler::logout))
        .route("/auth/me", get(handler::me))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ));

    public_routes.merge(protected_routes)
}
