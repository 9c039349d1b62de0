pub mod client;
pub mod revocation;

use client::RedisService;
use revocation::{InMemoryRevocations, RevocationStore};
use std::sync::Arc;
use tracing::warn;

/// Redis when it is configured and reachable, otherwise a process-local list.
pub async fn connect_revocations(redis_url: Option<&str>) -> Arc<dyn RevocationStore> {
    let Some(url) = redis_url else {
        warn!("REDIS_URL not set; logged-out sessions are only remembered by this process");
        return Arc::new(InMemoryRevocations::new());
    };

    match RedisService::new(url).await {
        Ok(redis) => Arc::new(redis),
        Err(e) => {
            warn!(
                "Redis unavailable ({}); logged-out sessions are only remembered by this process",
                e
            );
            Arc::new(InMemoryRevocations::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_redis_falls_back_to_memory() {
        for url in [Some("redis://127.0.0.1:1"), Some("not a redis url"), None] {
            let store = connect_revocations(url).await;
            store.revoke("jti-1", 60).await.unwrap();
            assert!(store.is_revoked("jti-1").await.unwrap(), "{url:?}");
            assert!(!store.is_revoked("jti-2").await.unwrap(), "{url:?}");
        }
    }
}
