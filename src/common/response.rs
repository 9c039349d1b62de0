use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON envelope returned by every catalog and admin endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: "error".to_string(),
            message: message.to_string(),
            data: None,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Unwraps the payload of a decoded envelope, keeping the server message on failure.
    pub fn into_data(self) -> Result<Option<T>, String> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(self.message)
        }
    }
}

pub struct ApiSuccess<T>(pub T, pub StatusCode);

impl<T> IntoResponse for ApiSuccess<ApiResponse<T>>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let (response, status) = (self.0, self.1);
        (status, Json(response)).into_response()
    }
}

#[derive(Debug)]
pub struct ApiError(pub String, pub StatusCode);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (message, status) = (self.0, self.1);
        let response = ApiResponse::<()>::error(&message);
        (status, Json(response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_round_trips_through_json() {
        let body = serde_json::to_string(&ApiResponse::<()>::error("Title is required")).unwrap();
        let decoded: ApiResponse<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(decoded.into_data().unwrap_err(), "Title is required");
    }

    #[test]
    fn success_envelope_yields_data() {
        let decoded: ApiResponse<u32> =
            serde_json::from_str(r#"{"status":"success","message":"ok","data":7}"#).unwrap();
        assert_eq!(decoded.into_data().unwrap(), Some(7));
    }
}
