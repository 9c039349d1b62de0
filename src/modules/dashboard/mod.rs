use crate::state::AppState;
use axum::middleware;
use axum::routing::get;
use axum::Router;

pub mod dto;
pub mod handler;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard", get(handler::dashboard))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ))
}
