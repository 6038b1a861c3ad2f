//! Change events for live subscriptions.

use garb_core::{GenerationId, GenerationStatus};

/// Published whenever a generation record changes.
///
/// Subscribers treat this as an invalidation signal: re-read the record by
/// id rather than trusting the event payload, exactly like a reactive query
/// re-running on a data change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationEvent {
    /// The generation that changed
    pub id: GenerationId,
    /// Its status after the change
    pub status: GenerationStatus,
    /// Whether the record was deleted (status is the last observed one)
    pub deleted: bool,
}
