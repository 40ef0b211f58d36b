use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::db::CacheStore;
use crate::error::AppResult;

/// In-memory cache store with per-entry TTL.
///
/// Backs the cache in tests and single-process deployments where Redis is
/// not available. Expired entries are dropped lazily on read.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String, ttl: u64) -> AppResult<()> {
        let expires_at = Instant::now() + Duration::from_secs(ttl);
        self.entries
            .lock()
            .await
            .insert(key.to_string(), (value, expires_at));
        Ok(())
    }
}
