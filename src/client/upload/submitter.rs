use super::file::{CandidateFile, FileSource};
use super::response::{SubmissionError, SubmissionResponse};
use crate::client::api::ApiClient;
use crate::modules::upload::handler::FILE_FIELD;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Body, Client};
use tokio_util::io::ReaderStream;
use tracing::debug;
use url::Url;

/// Sends one candidate file to the upload endpoint.
#[async_trait]
pub trait Submitter: Send + Sync + 'static {
    async fn submit(
        &self,
        endpoint: &Url,
        file: &CandidateFile,
    ) -> Result<SubmissionResponse, SubmissionError>;
}

/// Multipart submission over HTTP, streaming files from disk.
#[derive(Clone, Debug)]
pub struct HttpSubmitter {
    client: Client,
    token: Option<String>,
}

impl HttpSubmitter {
    pub fn new(token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            token,
        }
    }

    pub fn from_api(api: &ApiClient) -> Self {
        Self::new(api.token().map(str::to_owned))
    }

    async fn part(file: &CandidateFile) -> Result<Part, SubmissionError> {
        let part = match &file.source {
            FileSource::Path(path) => {
                let handle = tokio::fs::File::open(path)
                    .await
                    .map_err(|e| SubmissionError::Transport(format!("Cannot read {}: {}", path.display(), e)))?;
                Part::stream_with_length(Body::wrap_stream(ReaderStream::new(handle)), file.size())
            }
            FileSource::Bytes(bytes) => Part::stream_with_length(Body::from(bytes.clone()), file.size()),
        };

        part.file_name(file.name().to_string())
            .mime_str(&file.info.media_type)
            .map_err(|e| SubmissionError::Transport(e.to_string()))
    }
}

fn transport(err: reqwest::Error) -> SubmissionError {
    SubmissionError::Transport(format!("Upload request failed: {}", err))
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(
        &self,
        endpoint: &Url,
        file: &CandidateFile,
    ) -> Result<SubmissionResponse, SubmissionError> {
        let form = Form::new().part(FILE_FIELD, Self::part(file).await?);

        let mut request = self.client.post(endpoint.clone()).multipart(form);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        debug!(file = file.name(), size = file.size(), %endpoint, "Submitting upload");
        let response = request.send().await.map_err(transport)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await.map_err(transport)?;

        Ok(SubmissionResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::upload::response::interpret;
    use crate::modules::auth::model::AdminUser;
    use crate::modules::auth::service::AuthService;
    use crate::state::test_support::test_state;
    use bytes::Bytes;
    use std::io::Write;
    use time::OffsetDateTime;

    /// Serves the real upload router on an ephemeral port.
    async fn serve() -> (Url, String) {
        let state = test_state();
        let admin = AdminUser {
            id: 9,
            username: "editor".to_string(),
            password_hash: String::new(),
            is_super_admin: false,
            created_at: OffsetDateTime::now_utc(),
        };
        let token = AuthService::establish_session(&state.config, &admin).unwrap().token;

        let app = crate::app::create_app(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (Url::parse(&format!("http://{}/", addr)).unwrap(), token)
    }

    #[tokio::test]
    async fn streams_a_file_from_disk() {
        let (base, token) = serve().await;
        let mut tmp = tempfile::Builder::new().suffix(".webm").tempfile().unwrap();
        tmp.write_all(&[1u8; 4096]).unwrap();
        let file = CandidateFile::from_path(tmp.path()).await.unwrap();

        let endpoint = base.join("api/v1/admin/uploads/trailer").unwrap();
        let response = HttpSubmitter::new(Some(token)).submit(&endpoint, &file).await.unwrap();

        let receipt = interpret(&response).unwrap();
        assert!(receipt.url.starts_with("/uploads/trailers/"));
        assert!(receipt.url.ends_with(".webm"));
        assert_eq!(receipt.size, Some(4096));
    }

    #[tokio::test]
    async fn surfaces_server_rejections() {
        let (base, token) = serve().await;
        let file = CandidateFile::from_bytes("notes.txt", "text/plain", Bytes::from_static(b"hello"));

        let endpoint = base.join("api/v1/admin/uploads/thumbnail").unwrap();
        let response = HttpSubmitter::new(Some(token)).submit(&endpoint, &file).await.unwrap();

        assert_eq!(response.status, 400);
        assert_eq!(
            interpret(&response).unwrap_err().to_string(),
            "Invalid file type. Allowed types: image/jpeg, image/png, image/webp"
        );
    }

    #[tokio::test]
    async fn requires_a_session() {
        let (base, _) = serve().await;
        let file = CandidateFile::from_bytes("a.png", "image/png", Bytes::from_static(b"png"));

        let endpoint = base.join("api/v1/admin/uploads/thumbnail").unwrap();
        let response = HttpSubmitter::new(None).submit(&endpoint, &file).await.unwrap();
        assert_eq!(response.status, 401);
        assert_eq!(
            interpret(&response).unwrap_err().to_string(),
            "Unauthorized: Missing session"
        );
    }
}
