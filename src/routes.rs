use crate::common::response::{ApiResponse, ApiSuccess};
use crate::docs::ApiDoc;
use crate::infrastructure::db::pool::ping;
use crate::state::AppState;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub fn configure_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1", api_routes(state.clone()))
        .layer(cors_layer(state.config.cors_origin.as_deref()))
}

fn api_routes(state: AppState) -> Router<AppState> {
    use crate::modules::{auth, dashboard, genre, movie, trailer, upload};

    Router::new()
        .route("/health", get(health))
        .merge(auth::router(state.clone()))
        .merge(movie::router(state.clone()))
        .merge(trailer::router(state.clone()))
        .merge(genre::router())
        .merge(dashboard::router(state.clone()))
        .merge(upload::router(state))
}

/// A configured origin allows credentialed requests, so the session cookie
/// travels with them; otherwise any origin may call without credentials.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let configured = origin.and_then(|o| match HeaderValue::from_str(o) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid CORS_ORIGIN {:?}", o);
            None
        }
    });

    match configured {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub database_connected: bool,
}

/// Service liveness and database connectivity
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is up", body = ApiResponse<HealthStatus>)
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus {
        database_connected: ping(&state.db).await,
    };
    ApiSuccess(ApiResponse::success(status, "ok"), StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use crate::app::create_app;
    use crate::state::test_support::test_state;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = create_app(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn health_reports_a_missing_database() {
        let request = Request::get("/api/v1/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["database_connected"], false);
    }

    #[tokio::test]
    async fn admin_routes_require_a_session() {
        for (method, uri) in [
            ("GET", "/api/v1/admin/dashboard"),
            ("POST", "/api/v1/admin/movies"),
            ("PUT", "/api/v1/admin/movies/1"),
            ("DELETE", "/api/v1/admin/movies/1?confirm=true"),
            ("POST", "/api/v1/admin/trailers"),
            ("DELETE", "/api/v1/admin/trailers/1?confirm=true"),
            ("GET", "/api/v1/auth/me"),
            ("POST", "/api/v1/auth/logout"),
        ] {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap();
            let (status, body) = send(request).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(body["status"], "error");
        }
    }

    #[tokio::test]
    async fn garbage_tokens_are_rejected() {
        let request = Request::get("/api/v1/auth/me")
            .header(header::COOKIE, "admin_session=not-a-jwt")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Unauthorized: Invalid or expired session");
    }

    #[tokio::test]
    async fn login_requires_credentials() {
        let request = Request::post("/api/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username":"","password":""}"#))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Username and password are required");
    }

    #[tokio::test]
    async fn logout_returns_the_admin_and_revokes_the_session() {
        use crate::modules::auth::model::AdminUser;
        use crate::modules::auth::service::AuthService;

        let state = test_state();
        let admin = AdminUser {
            id: 7,
            username: "editor".to_string(),
            password_hash: String::new(),
            is_super_admin: false,
            created_at: time::OffsetDateTime::now_utc(),
        };
        let session = AuthService::establish_session(&state.config, &admin).unwrap();
        let bearer = format!("Bearer {}", session.token);

        let response = create_app(state.clone())
            .oneshot(
                Request::post("/api/v1/auth/logout")
                    .header(header::AUTHORIZATION, &bearer)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["id"], 7);
        assert_eq!(body["data"]["username"], "editor");

        let response = create_app(state)
            .oneshot(
                Request::get("/api/v1/auth/me")
                    .header(header::AUTHORIZATION, &bearer)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let request = Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/v1/admin/uploads/{kind}"].is_object());
    }
}
