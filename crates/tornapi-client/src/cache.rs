//! Response cache seam.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CacheError;
use crate::request::CacheKey;

/// Stores successful responses keyed by the full request shape.
///
/// Implementations may be remote; both operations may suspend.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Returns a previously stored, still fresh response.
    async fn get(&self, key: &CacheKey) -> Result<Option<Value>, CacheError>;

    /// Stores `value` until `expiry_ms` (epoch milliseconds).
    async fn set(&self, key: CacheKey, value: Value, expiry_ms: u64) -> Result<(), CacheError>;
}

impl std::fmt::Debug for dyn ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn ResponseCache")
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64)
}

/// Process-local cache that drops entries once their expiry has passed.
/// Expired entries are evicted on read and swept on every write.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<CacheKey, (Value, u64)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<Value>, CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::Backend(e.to_string()))?;
        match entries.get(key) {
            Some((_, expiry)) if *expiry <= now_ms() => {
                entries.remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: CacheKey, value: Value, expiry_ms: u64) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::Backend(e.to_string()))?;
        let now = now_ms();
        entries.retain(|_, (_, expiry)| *expiry > now);
        entries.insert(key, (value, expiry_ms));
        Ok(())
    }
}
