use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Validation(String),
    /// The server answered with an error envelope or a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Upload(#[from] crate::client::upload::session::SessionError),
    #[error("Not logged in")]
    NotAuthenticated,
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}
