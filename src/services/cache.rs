use std::sync::Mutex;

use tracing::debug;

use super::types::CacheKey;
use super::QueryCache;

/// Records invalidations in order. Hosts poll it to refresh their views.
#[derive(Debug, Default)]
pub struct InvalidationLog {
    keys: Mutex<Vec<CacheKey>>,
}

impl InvalidationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidated(&self) -> Vec<CacheKey> {
        self.keys.lock().map(|k| k.clone()).unwrap_or_default()
    }
}

impl QueryCache for InvalidationLog {
    fn invalidate(&self, key: CacheKey) {
        debug!("Cache invalidated: {:?}", key);
        if let Ok(mut keys) = self.keys.lock() {
            keys.push(key);
        }
    }
}
