use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Flat success body of the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub filename: String,
    pub size: u64,
}

/// Failure body; `error` repeats the message for clients that only read that field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadFailure {
    pub status: String,
    pub message: String,
    pub error: String,
}

impl UploadFailure {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: "error".to_string(),
            error: message.clone(),
            message,
        }
    }
}
