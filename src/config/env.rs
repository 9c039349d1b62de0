use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    DatabaseUrl,
    RedisUrl,
    JwtSecret,
    MaxUploadBytes,
    CorsOrigin,
    SecureCookies,
    ApiUrl,
    AdminUsername,
    AdminPassword,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::DatabaseUrl => "DATABASE_URL",
            EnvKey::RedisUrl => "REDIS_URL",
            EnvKey::JwtSecret => "JWT_SECRET",
            EnvKey::MaxUploadBytes => "MAX_UPLOAD_BYTES",
            EnvKey::CorsOrigin => "CORS_ORIGIN",
            EnvKey::SecureCookies => "SECURE_COOKIES",
            EnvKey::ApiUrl => "MOVIEFLIX_API_URL",
            EnvKey::AdminUsername => "MOVIEFLIX_USERNAME",
            EnvKey::AdminPassword => "MOVIEFLIX_PASSWORD",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_optional(key: EnvKey) -> Option<String> {
    env::var(key.as_str()).ok().filter(|value| !value.trim().is_empty())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
