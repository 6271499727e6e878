use serde::{Deserialize, Serialize};

/// Counters for one completed sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub synced_count: u32,
    pub failed_count: u32,
    pub retried_count: u32,
    pub pending_count: u64,
}
