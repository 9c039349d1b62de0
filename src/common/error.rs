use crate::common::response::ApiError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Failure taxonomy shared by the services and handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad input caught before any external call is made.
    #[error("{0}")]
    Validation(String),
    /// The upload could not be accepted or its response was unusable.
    #[error("{0}")]
    Submission(String),
    /// The record store rejected or failed an operation.
    #[error("{0}")]
    Store(String),
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Submission(_) => StatusCode::BAD_GATEWAY,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        error!("Database error: {}", err);
        AppError::Store(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| errors.to_string());
        AppError::Validation(message)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let status = err.status();
        ApiError(err.to_string(), status)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_kind_to_its_status() {
        assert_eq!(AppError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Submission("x".into()).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::Store("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::Auth("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_errors_keep_the_raw_message() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        let api: ApiError = err.into();
        assert_eq!(api.1, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.0, sqlx::Error::RowNotFound.to_string());
    }
}
