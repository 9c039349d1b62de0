use super::model::AdminUser;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username and password are required"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Username and password are required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminResponse {
    pub id: i64,
    pub username: String,
    pub is_super_admin: bool,
}

impl From<AdminUser> for AdminResponse {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            is_super_admin: user.is_super_admin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Same value as the `admin_session` cookie, for clients without a cookie jar.
    pub session_token: String,
    pub expires_in: u64,
    pub admin: AdminResponse,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Admin id.
    pub sub: String,
    pub username: String,
    pub super_admin: bool,
    /// Token id, the handle used to revoke a session on logout.
    pub jti: String,
    pub exp: usize,
    pub iat: usize,
}

/// The authenticated caller, inserted into request extensions by the session gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    pub admin_id: i64,
    pub username: String,
    pub is_super_admin: bool,
    pub token_id: String,
    pub expires_at: usize,
}

impl TryFrom<SessionClaims> for AdminContext {
    type Error = std::num::ParseIntError;

    fn try_from(claims: SessionClaims) -> Result<Self, Self::Error> {
        Ok(Self {
            admin_id: claims.sub.parse()?,
            username: claims.username,
            is_super_admin: claims.super_admin,
            token_id: claims.jti,
            expires_at: claims.exp,
        })
    }
}

impl From<&AdminContext> for AdminResponse {
    fn from(ctx: &AdminContext) -> Self {
        Self {
            id: ctx.admin_id,
            username: ctx.username.clone(),
            is_super_admin: ctx.is_super_admin,
        }
    }
}
