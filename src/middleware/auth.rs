use crate::common::response::ApiError;
use crate::modules::auth::handler::SESSION_COOKIE;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}

/// Resolves the session once per request and hands handlers an `AdminContext`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .or_else(|| cookies.get(SESSION_COOKIE).map(|c| c.value().to_owned()));

    let token = match token {
        Some(t) => t,
        None => {
            return Err(ApiError(
                "Unauthorized: Missing session".to_string(),
                StatusCode::UNAUTHORIZED,
            ))
        }
    };

    let context = AuthService::resolve_session(&state, &token).await?;
    tracing::debug!(admin_id = context.admin_id, "Session resolved");

    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_bearer_tokens() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def".to_string()));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }
}
