use super::dto::DashboardStats;
use super::service::DashboardService;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

/// Catalog overview for the back-office
#[utoipa::path(
    get,
    path = "/api/v1/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard statistics", body = ApiResponse<DashboardStats>),
        (status = 401, description = "Unauthorized")
    ),
    security(("session_cookie" = [])),
    tag = "Admin"
)]
pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    match DashboardService::stats(state).await {
        Ok(stats) => ApiSuccess(
            ApiResponse::success(stats, "Dashboard retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}
