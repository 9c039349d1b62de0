use crate::client::error::ClientError;
use crate::client::gateway::{EntityKind, RecordGateway};
use crate::common::response::ApiResponse;
use crate::common::upload::UploadKind;
use crate::config::settings::ClientConfig;
use crate::modules::auth::dto::{AdminResponse, LoginRequest, LoginResponse};
use crate::modules::dashboard::dto::DashboardStats;
use crate::modules::genre::dto::GenreCount;
use crate::modules::movie::dto::{MovieDetailResponse, MovieFields, MovieWriteResponse};
use crate::modules::movie::model::Movie;
use crate::modules::trailer::dto::TrailerFields;
use crate::modules::trailer::model::Trailer;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

const API_PREFIX: &str = "api/v1";

/// HTTP client for the catalog and admin API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            // Trailing slash so joins stay under any path prefix.
            base_url: Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?,
            token: None,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(&config.api_url)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(&format!("{}{}", API_PREFIX, path))?)
    }

    pub fn upload_endpoint(&self, kind: UploadKind) -> Result<Url, ClientError> {
        self.endpoint(&format!("/admin/uploads/{}", kind))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and unwraps the JSON envelope.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>, ClientError> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), len = body.len(), "API response");

        match serde_json::from_slice::<ApiResponse<T>>(&body) {
            Ok(envelope) if status.is_success() => {
                envelope.into_data().map_err(|message| ClientError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
            Ok(envelope) => Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope.message,
            }),
            Err(_) => {
                let text = String::from_utf8_lossy(&body).trim().to_string();
                Err(ClientError::Api {
                    status: status.as_u16(),
                    message: if text.is_empty() {
                        format!("Request failed with status {}", status.as_u16())
                    } else {
                        text
                    },
                })
            }
        }
    }

    async fn send_data<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        self.send(request).await?.ok_or_else(|| ClientError::Api {
            status: 200,
            message: "Response carried no data".to_string(),
        })
    }

    fn optional<T>(result: Result<T, ClientError>) -> Result<Option<T>, ClientError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Logs in and keeps the session token for later calls.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<AdminResponse, ClientError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = self.client.post(self.endpoint("/auth/login")?).json(&body);
        let login: LoginResponse = self.send_data(request).await?;

        self.token = Some(login.session_token);
        Ok(login.admin)
    }

    pub async fn logout(&mut self) -> Result<(), ClientError> {
        if self.token.is_none() {
            return Err(ClientError::NotAuthenticated);
        }
        let request = self.client.post(self.endpoint("/auth/logout")?);
        self.send::<serde_json::Value>(request).await?;
        self.token = None;
        Ok(())
    }

    pub async fn me(&self) -> Result<AdminResponse, ClientError> {
        let request = self.client.get(self.endpoint("/auth/me")?);
        self.send_data(request).await
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, ClientError> {
        let request = self.client.get(self.endpoint("/admin/dashboard")?);
        self.send_data(request).await
    }

    pub async fn genres(&self) -> Result<Vec<GenreCount>, ClientError> {
        let request = self.client.get(self.endpoint("/genres")?);
        self.send_data(request).await
    }
}

#[async_trait]
impl RecordGateway for ApiClient {
    async fn create_movie(&self, fields: &MovieFields) -> Result<MovieWriteResponse, ClientError> {
        let request = self.client.post(self.endpoint("/admin/movies")?).json(fields);
        self.send_data(request).await
    }

    async fn update_movie(
        &self,
        id: i64,
        fields: &MovieFields,
    ) -> Result<MovieWriteResponse, ClientError> {
        let request = self
            .client
            .put(self.endpoint(&format!("/admin/movies/{}", id))?)
            .json(fields);
        self.send_data(request).await
    }

    async fn create_trailer(&self, fields: &TrailerFields) -> Result<Trailer, ClientError> {
        let request = self.client.post(self.endpoint("/admin/trailers")?).json(fields);
        self.send_data(request).await
    }

    /// Callers confirm with the user first; the request itself carries the confirmation.
    async fn delete(&self, kind: EntityKind, id: i64) -> Result<(), ClientError> {
        let path = match kind {
            EntityKind::Movie => format!("/admin/movies/{}", id),
            EntityKind::Trailer => format!("/admin/trailers/{}", id),
        };
        let request = self
            .client
            .delete(self.endpoint(&path)?)
            .query(&[("confirm", "true")]);
        self.send::<serde_json::Value>(request).await?;
        Ok(())
    }

    async fn list_movies(&self, genre: Option<&str>) -> Result<Vec<Movie>, ClientError> {
        let mut request = self.client.get(self.endpoint("/movies")?);
        if let Some(genre) = genre {
            request = request.query(&[("genre", genre)]);
        }
        self.send_data(request).await
    }

    async fn get_movie(&self, id: i64) -> Result<Option<MovieDetailResponse>, ClientError> {
        let request = self.client.get(self.endpoint(&format!("/movies/{}", id))?);
        Self::optional(self.send_data(request).await)
    }

    async fn get_trailer(&self, id: i64) -> Result<Option<Trailer>, ClientError> {
        let request = self.client.get(self.endpoint(&format!("/trailers/{}", id))?);
        Self::optional(self.send_data(request).await)
    }
}
