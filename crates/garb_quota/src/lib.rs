//! Per-user daily usage limits.
//!
//! Each user gets a fixed number of generation requests per UTC calendar
//! day. The counter is keyed by `(user, day)`, created lazily on first use,
//! and incremented atomically so concurrent admissions never lose updates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod day;
mod gate;
mod usage;

pub use day::{day_key, day_key_at};
pub use gate::{QuotaGate, QuotaStatus, DEFAULT_DAILY_LIMIT};
pub use usage::{MemoryUsageStore, UsageStore};
