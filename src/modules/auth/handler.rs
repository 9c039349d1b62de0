use super::dto::{AdminContext, AdminResponse, LoginRequest, LoginResponse};
use super::service::{AuthService, SESSION_TTL_SECONDS};
use crate::common::error::AppError;
use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use validator::Validate;

pub const SESSION_COOKIE: &str = "admin_session";

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .path("/")
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(SESSION_TTL_SECONDS as i64))
        .build()
}

/// Log in as an admin
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Invalid username or password")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return AppError::from(e).into_response();
    }

    let admin = match AuthService::authenticate(state.clone(), &payload).await {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            return ApiError("Invalid username or password".to_string(), StatusCode::UNAUTHORIZED)
                .into_response()
        }
        Err(e) => return e.into_response(),
    };

    match AuthService::establish_session(&state.config, &admin) {
        Ok(session) => {
            cookies.add(session_cookie(session.token.clone(), state.config.secure_cookies));

            let response = LoginResponse {
                session_token: session.token,
                expires_in: SESSION_TTL_SECONDS,
                admin: AdminResponse::from(admin),
            };
            ApiSuccess(ApiResponse::success(response, "Login successful"), StatusCode::OK)
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Log out and revoke the current session
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out successfully", body = ApiResponse<AdminResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(("session_cookie" = [])),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(context): Extension<AdminContext>,
) -> impl IntoResponse {
    if let Err(e) = AuthService::clear_session(state, &context).await {
        return e.into_response();
    }

    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());

    ApiSuccess(
        ApiResponse::success(AdminResponse::from(&context), "Logged out successfully"),
        StatusCode::OK,
    )
    .into_response()
}

/// Current admin
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Authenticated admin", body = ApiResponse<AdminResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(("session_cookie" = [])),
    tag = "Auth"
)]
pub async fn me(Extension(context): Extension<AdminContext>) -> impl IntoResponse {
    ApiSuccess(
        ApiResponse::success(AdminResponse::from(&context), "Admin retrieved successfully"),
        StatusCode::OK,
    )
}
