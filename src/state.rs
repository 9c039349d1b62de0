use crate::config::settings::AppConfig;
use crate::infrastructure::db::pool::DbPool;
use crate::infrastructure::redis::revocation::RevocationStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub revocations: Arc<dyn RevocationStore>,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbPool, revocations: Arc<dyn RevocationStore>) -> Self {
        Self {
            config,
            db,
            revocations,
        }
    }
}
