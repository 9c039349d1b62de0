use super::dto::{UploadFailure, UploadResponse};
use super::service::UploadService;
use crate::common::error::AppError;
use crate::common::upload::UploadKind;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

pub const FILE_FIELD: &str = "file";

fn failure(err: AppError) -> Response {
    let status = err.status();
    warn!("Upload rejected: {}", err);
    (status, Json(UploadFailure::new(err.to_string()))).into_response()
}

/// Upload a movie, trailer or thumbnail file
#[utoipa::path(
    post,
    path = "/api/v1/admin/uploads/{kind}",
    params(("kind" = UploadKind, Path, description = "movie, trailer or thumbnail")),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload accepted", body = UploadResponse),
        (status = 400, description = "Missing, oversized or unsupported file", body = UploadFailure),
        (status = 401, description = "Unauthorized"),
        (status = 413, description = "Request body too large")
    ),
    security(("session_cookie" = [])),
    tag = "Admin"
)]
pub async fn upload_file(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let kind = match kind.parse::<UploadKind>() {
        Ok(kind) => kind,
        Err(e) => return failure(AppError::Validation(e)),
    };
    let constraint = kind.constraint().capped_at(state.config.max_upload_bytes);

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return failure(AppError::Validation(e.body_text())),
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        return match UploadService::accept(kind, &constraint, field).await {
            Ok(uploaded) => (StatusCode::OK, Json(uploaded)).into_response(),
            Err(e) => failure(e),
        };
    }

    failure(AppError::Validation("No file uploaded".to_string()))
}
