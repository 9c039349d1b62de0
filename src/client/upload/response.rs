use bytes::Bytes;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const HTML_ERROR_PAGE: &str = "Server returned an HTML error page. Please check server logs.";

/// Plain-text error bodies shorter than this many UTF-16 units are shown as-is.
const MAX_TEXT_MESSAGE: usize = 100;

/// Raw answer of the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl SubmissionResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_owned),
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, Some(mime::APPLICATION_JSON.essence_str()), body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|t| t.contains(mime::APPLICATION_JSON.essence_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub url: String,
    pub filename: Option<String>,
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Non-success status, with the most useful message the body offered.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Invalid response format from server")]
    InvalidFormat,
    #[error("No URL returned from server")]
    MissingUrl,
    #[error("{0}")]
    Transport(String),
    #[error("Upload timed out after {0:?}")]
    TimedOut(Duration),
}

fn failure_message(response: &SubmissionResponse) -> String {
    let default = format!("Upload failed with status {}", response.status);

    if response.is_json() {
        return serde_json::from_slice::<Value>(&response.body)
            .ok()
            .and_then(|body| {
                ["error", "message"].iter().find_map(|key| {
                    body.get(key)
                        .and_then(Value::as_str)
                        .filter(|m| !m.is_empty())
                        .map(str::to_owned)
                })
            })
            .unwrap_or(default);
    }

    let text = String::from_utf8_lossy(&response.body);
    if text.contains("<!DOCTYPE") {
        HTML_ERROR_PAGE.to_string()
    } else if !text.is_empty() && text.encode_utf16().count() < MAX_TEXT_MESSAGE {
        text.into_owned()
    } else {
        default
    }
}

/// Turns the endpoint's answer into a receipt, or the reason the upload failed.
pub fn interpret(response: &SubmissionResponse) -> Result<UploadReceipt, SubmissionError> {
    if !response.is_success() {
        return Err(SubmissionError::Rejected {
            status: response.status,
            message: failure_message(response),
        });
    }

    let body: Value =
        serde_json::from_slice(&response.body).map_err(|_| SubmissionError::InvalidFormat)?;

    let url = body
        .get("url")
        .and_then(Value::as_str)
        .filter(|u| !u.is_empty())
        .ok_or(SubmissionError::MissingUrl)?;

    Ok(UploadReceipt {
        url: url.to_string(),
        filename: body.get("filename").and_then(Value::as_str).map(str::to_owned),
        size: body.get("size").and_then(Value::as_u64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(response: SubmissionResponse) -> String {
        interpret(&response).unwrap_err().to_string()
    }

    #[test]
    fn success_with_url() {
        let receipt = interpret(&SubmissionResponse::json(
            200,
            &json!({"success": true, "url": "/x/y.mp4", "filename": "y.mp4", "size": 12}),
        ))
        .unwrap();
        assert_eq!(receipt.url, "/x/y.mp4");
        assert_eq!(receipt.filename.as_deref(), Some("y.mp4"));
        assert_eq!(receipt.size, Some(12));
    }

    #[test]
    fn success_without_url() {
        assert_eq!(
            interpret(&SubmissionResponse::json(200, &json!({}))),
            Err(SubmissionError::MissingUrl)
        );
        assert_eq!(
            message(SubmissionResponse::json(200, &json!({"url": ""}))),
            "No URL returned from server"
        );
    }

    #[test]
    fn success_with_a_body_that_is_not_json() {
        assert_eq!(
            message(SubmissionResponse::new(200, Some("text/plain"), "stored")),
            "Invalid response format from server"
        );
    }

    #[test]
    fn html_error_pages() {
        let response = SubmissionResponse::new(
            500,
            Some("text/html"),
            "<!DOCTYPE html><html><body>Internal Server Error</body></html>",
        );
        assert_eq!(message(response), HTML_ERROR_PAGE);
    }

    #[test]
    fn json_errors_prefer_the_error_field() {
        let response = SubmissionResponse::json(
            400,
            &json!({"status": "error", "message": "Bad", "error": "Invalid file type"}),
        );
        assert_eq!(message(response), "Invalid file type");

        let response = SubmissionResponse::json(401, &json!({"status": "error", "message": "Unauthorized"}));
        assert_eq!(message(response), "Unauthorized");

        let response = SubmissionResponse::new(502, Some("application/json; charset=utf-8"), "{");
        assert_eq!(message(response), "Upload failed with status 502");
    }

    #[test]
    fn short_text_errors_are_shown_as_is() {
        let response = SubmissionResponse::new(413, Some("text/plain"), "length limit exceeded");
        assert_eq!(message(response), "length limit exceeded");
    }

    #[test]
    fn long_or_empty_text_falls_back_to_the_status() {
        let long = "x".repeat(MAX_TEXT_MESSAGE);
        assert_eq!(
            message(SubmissionResponse::new(500, None, long)),
            "Upload failed with status 500"
        );
        assert_eq!(
            message(SubmissionResponse::new(503, None, "")),
            "Upload failed with status 503"
        );
    }

    #[test]
    fn text_length_is_measured_in_utf16_units() {
        let emoji = "\u{1F3AC}".repeat(MAX_TEXT_MESSAGE / 2);
        assert_eq!(
            message(SubmissionResponse::new(500, None, emoji)),
            "Upload failed with status 500"
        );
        let accented = "é".repeat(MAX_TEXT_MESSAGE - 1);
        assert_eq!(message(SubmissionResponse::new(500, None, accented.clone())), accented);
    }
}
