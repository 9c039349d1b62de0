use super::revocation::RevocationStore;
use anyhow::Result;
use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use tracing::info;

#[derive(Clone)]
pub struct RedisService {
    client: Client,
}

impl RedisService {
    pub async fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = Client::open(connection_string)?;

        // Test connection
        let _conn = client.get_multiplexed_async_connection().await?;

        info!("✅ Connected to Redis");
        Ok(Self { client })
    }

    pub async fn get_conn(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    fn revoked_key(token_id: &str) -> String {
        format!("revoked_session:{}", token_id)
    }
}

#[async_trait]
impl RevocationStore for RedisService {
    async fn revoke(&self, token_id: &str, ttl_seconds: u64) -> Result<()> {
        let mut conn = self.get_conn().await?;
        // A zero TTL is rejected by SETEX; the token has expired anyway.
        if ttl_seconds == 0 {
            return Ok(());
        }
        let _: () = conn
            .set_ex(Self::revoked_key(token_id), "revoked", ttl_seconds)
            .await?;
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool> {
        let mut conn = self.get_conn().await?;
        let revoked: bool = conn.exists(Self::revoked_key(token_id)).await?;
        Ok(revoked)
    }
}
