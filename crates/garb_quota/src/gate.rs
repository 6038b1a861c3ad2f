//! The quota gate consulted at admission time.

use crate::{day_key, UsageStore};
use garb_core::UserId;
use garb_error::GarbResult;
use std::sync::Arc;

/// Default daily generation allowance per user.
pub const DEFAULT_DAILY_LIMIT: u32 = 10;

/// Result of a quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaStatus {
    /// Whether another generation may be admitted today
    pub allowed: bool,
    /// Generations used so far today
    pub used: u32,
    /// Daily allowance
    pub limit: u32,
}

/// Per-user, per-UTC-day request counter.
///
/// The check is advisory: callers consult it before creating a generation
/// record and record usage only after a successful admission. A generation
/// that later fails still consumes its slot.
#[derive(Clone)]
pub struct QuotaGate {
    store: Arc<dyn UsageStore>,
    limit: u32,
}

impl QuotaGate {
    /// Create a gate with the default daily limit.
    pub fn new(store: Arc<dyn UsageStore>) -> Self {
        Self::with_limit(store, DEFAULT_DAILY_LIMIT)
    }

    /// Create a gate with a custom daily limit.
    pub fn with_limit(store: Arc<dyn UsageStore>, limit: u32) -> Self {
        Self { store, limit }
    }

    /// The configured daily allowance.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Check whether the user may start another generation today.
    #[tracing::instrument(skip(self))]
    pub async fn check(&self, user_id: &UserId) -> GarbResult<QuotaStatus> {
        let used = self.store.count(user_id, &day_key()).await?;
        Ok(QuotaStatus {
            allowed: used < self.limit,
            used,
            limit: self.limit,
        })
    }

    /// Record one admitted generation for the user.
    #[tracing::instrument(skip(self))]
    pub async fn record(&self, user_id: &UserId) -> GarbResult<()> {
        let used = self.store.increment(user_id, &day_key()).await?;
        tracing::debug!(user = %user_id, used, limit = self.limit, "Recorded usage");
        Ok(())
    }
}

impl std::fmt::Debug for QuotaGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaGate")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}
