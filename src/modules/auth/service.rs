use super::dto::{AdminContext, LoginRequest, SessionClaims};
use super::model::AdminUser;
use super::repository::AdminRepository;
use crate::common::error::{AppError, AppResult};
use crate::config::settings::AppConfig;
use crate::state::AppState;
use jsonwebtoken::{decode, encode, get_current_timestamp, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Sessions last one week from issuance.
pub const SESSION_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;

const BCRYPT_COST: u32 = 10;

pub struct IssuedSession {
    pub token: String,
    pub claims: SessionClaims,
}

pub struct AuthService;

impl AuthService {
    /// Checks the credentials against the stored bcrypt hash.
    /// A store failure is an error, never a login.
    pub async fn authenticate(state: AppState, req: &LoginRequest) -> AppResult<Option<AdminUser>> {
        let user = match AdminRepository::find_by_username(&state.db, &req.username).await? {
            Some(user) => user,
            None => {
                info!("Login attempt for unknown admin");
                return Ok(None);
            }
        };

        let password = req.password.clone();
        let hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Store(format!("Password check aborted: {}", e)))?
            .unwrap_or_else(|e| {
                error!("Stored password hash for admin {} is unusable: {}", user.id, e);
                false
            });

        if !valid {
            warn!("Invalid password for admin {}", user.id);
            return Ok(None);
        }

        Ok(Some(user))
    }

    pub fn establish_session(config: &AppConfig, admin: &AdminUser) -> AppResult<IssuedSession> {
        let now = get_current_timestamp();
        let claims = SessionClaims {
            sub: admin.id.to_string(),
            username: admin.username.clone(),
            super_admin: admin.is_super_admin,
            jti: Uuid::new_v4().to_string(),
            iat: now as usize,
            exp: (now + SESSION_TTL_SECONDS) as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Auth(format!("Failed to issue session: {}", e)))?;

        info!("Session established for admin {}", admin.id);
        Ok(IssuedSession { token, claims })
    }

    pub fn verify_token(config: &AppConfig, token: &str) -> AppResult<AdminContext> {
        let claims = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Auth("Unauthorized: Invalid or expired session".to_string()))?
        .claims;

        AdminContext::try_from(claims)
            .map_err(|_| AppError::Auth("Unauthorized: Malformed session".to_string()))
    }

    /// The session gate: a token is authenticated when it verifies and was not logged out.
    pub async fn resolve_session(state: &AppState, token: &str) -> AppResult<AdminContext> {
        let context = Self::verify_token(&state.config, token)?;

        let revoked = state
            .revocations
            .is_revoked(&context.token_id)
            .await
            .map_err(|e| {
                error!("Revocation lookup failed: {}", e);
                AppError::Store("Internal Server Error: Session store unavailable".to_string())
            })?;

        if revoked {
            return Err(AppError::Auth("Unauthorized: Session has been revoked".to_string()));
        }

        Ok(context)
    }

    pub async fn clear_session(state: AppState, context: &AdminContext) -> AppResult<()> {
        let remaining = (context.expires_at as u64).saturating_sub(get_current_timestamp());
        state
            .revocations
            .revoke(&context.token_id, remaining)
            .await
            .map_err(|e| AppError::Store(format!("Failed to revoke session: {}", e)))?;

        info!("Session cleared for admin {}", context.admin_id);
        Ok(())
    }

    pub async fn create_admin(
        pool: &PgPool,
        username: &str,
        password: &str,
        is_super_admin: bool,
    ) -> AppResult<AdminUser> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        let password = password.to_string();
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
            .await
            .map_err(|e| AppError::Store(format!("Password hashing aborted: {}", e)))?
            .map_err(|e| AppError::Store(format!("Password hashing failed: {}", e)))?;

        let admin = AdminRepository::create(pool, username.trim(), &hash, is_super_admin).await?;
        info!("Created admin {} ({})", admin.username, admin.id);
        Ok(admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{test_config, test_state};
    use time::OffsetDateTime;

    fn admin() -> AdminUser {
        AdminUser {
            id: 2,
            username: "admin".to_string(),
            password_hash: String::new(),
            is_super_admin: true,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn issued_sessions_verify_and_last_a_week() {
        let config = test_config();
        let session = AuthService::establish_session(&config, &admin()).unwrap();
        assert_eq!(
            (session.claims.exp - session.claims.iat) as u64,
            SESSION_TTL_SECONDS
        );

        let context = AuthService::verify_token(&config, &session.token).unwrap();
        assert_eq!(context.admin_id, 2);
        assert_eq!(context.username, "admin");
        assert!(context.is_super_admin);
        assert_eq!(context.token_id, session.claims.jti);
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let mut other = test_config();
        other.jwt_secret = "other".to_string();
        let session = AuthService::establish_session(&other, &admin()).unwrap();

        let err = AuthService::verify_token(&test_config(), &session.token).unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[tokio::test]
    async fn cleared_sessions_no_longer_resolve() {
        let state = test_state();
        let session = AuthService::establish_session(&state.config, &admin()).unwrap();

        let context = AuthService::resolve_session(&state, &session.token).await.unwrap();
        AuthService::clear_session(state.clone(), &context).await.unwrap();

        let err = AuthService::resolve_session(&state, &session.token).await.unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized: Session has been revoked");
    }

    #[tokio::test]
    async fn create_admin_requires_credentials() {
        let state = test_state();
        let err = AuthService::create_admin(&state.db, " ", "pw", false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
