use super::model::AdminUser;
use sqlx::PgPool;

pub struct AdminRepository;

impl AdminRepository {
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<AdminUser>, sqlx::Error> {
        sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, username, password, is_super_admin, created_at
            FROM admin_users
            WHERE username = $1
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
        is_super_admin: bool,
    ) -> Result<AdminUser, sqlx::Error> {
        sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (username, password, is_super_admin)
            VALUES ($1, $2, $3)
            RETURNING id, username, password, is_super_admin, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(is_super_admin)
        .fetch_one(pool)
        .await
    }
}
