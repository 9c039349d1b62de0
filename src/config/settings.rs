use serde::Deserialize;
use crate::common::upload::DEFAULT_MAX_SIZE;
use crate::config::env::{self, EnvKey};

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    /// Without Redis, revoked sessions are only remembered by this process.
    pub redis_url: Option<String>,
    pub jwt_secret: String,
    pub max_upload_bytes: u64,
    pub cors_origin: Option<String>,
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            database_url: env::get(EnvKey::DatabaseUrl)?,
            redis_url: env::get_optional(EnvKey::RedisUrl),
            jwt_secret: env::get(EnvKey::JwtSecret)?,
            max_upload_bytes: env::get_parsed(EnvKey::MaxUploadBytes, DEFAULT_MAX_SIZE),
            cors_origin: env::get_optional(EnvKey::CorsOrigin),
            secure_cookies: env::get_parsed(EnvKey::SecureCookies, false),
        })
    }
}

/// Connection settings for the admin client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: env::get_or(EnvKey::ApiUrl, "http://localhost:3000"),
            username: env::get_optional(EnvKey::AdminUsername),
            password: env::get_optional(EnvKey::AdminPassword),
        }
    }
}
