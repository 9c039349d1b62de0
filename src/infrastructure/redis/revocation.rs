use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Remembers session tokens that were logged out before they expired.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    async fn revoke(&self, token_id: &str, ttl_seconds: u64) -> Result<()>;
    async fn is_revoked(&self, token_id: &str) -> Result<bool>;
}

/// Process-local fallback used when Redis is not configured or not reachable.
#[derive(Default)]
pub struct InMemoryRevocations {
    entries: Mutex<HashMap<String, Instant>>,
}

impl InMemoryRevocations {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocations {
    async fn revoke(&self, token_id: &str, ttl_seconds: u64) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| anyhow::anyhow!("revocation list poisoned"))?;
        let now = Instant::now();
        entries.retain(|_, expires| *expires > now);
        entries.insert(token_id.to_string(), now + Duration::from_secs(ttl_seconds));
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool> {
        let entries = self.entries.lock().map_err(|_| anyhow::anyhow!("revocation list poisoned"))?;
        Ok(entries
            .get(token_id)
            .is_some_and(|expires| *expires > Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn revoked_tokens_are_remembered_until_expiry() {
        let store = InMemoryRevocations::new();
        assert!(!store.is_revoked("abc").await.unwrap());

        store.revoke("abc", 60).await.unwrap();
        assert!(store.is_revoked("abc").await.unwrap());

        store.revoke("gone", 0).await.unwrap();
        assert!(!store.is_revoked("gone").await.unwrap());
    }
}
