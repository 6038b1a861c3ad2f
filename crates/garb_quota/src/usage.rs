//! Usage counter storage.

use garb_core::UserId;
use garb_error::GarbResult;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Store for per-(user, day) usage counters.
///
/// `increment` must be an atomic read-modify-write: two concurrent calls for
/// the same key observe each other, so counts sum exactly.
#[async_trait::async_trait]
pub trait UsageStore: Send + Sync {
    /// Current count for a user and day key, zero if no row exists.
    async fn count(&self, user_id: &UserId, day: &str) -> GarbResult<u32>;

    /// Atomically increment the counter, creating the row lazily.
    /// Returns the count after the increment.
    async fn increment(&self, user_id: &UserId, day: &str) -> GarbResult<u32>;
}

/// In-memory usage counters behind a single lock.
#[derive(Debug, Default)]
pub struct MemoryUsageStore {
    counts: Mutex<HashMap<(UserId, String), u32>>,
}

impl MemoryUsageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UsageStore for MemoryUsageStore {
    async fn count(&self, user_id: &UserId, day: &str) -> GarbResult<u32> {
        Ok(self
            .counts
            .lock()
            .await
            .get(&(*user_id, day.to_string()))
            .copied()
            .unwrap_or(0))
    }

    async fn increment(&self, user_id: &UserId, day: &str) -> GarbResult<u32> {
        let mut counts = self.counts.lock().await;
        let count = counts.entry((*user_id, day.to_string())).or_insert(0);
        *count += 1;
        Ok(*count)
    }
}
