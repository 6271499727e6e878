use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Session-wide sync progress. Not persisted; recomputed around every pass,
/// on record creation, and on the periodic ticker. The error list is
/// informational; `pending_count` is the source of truth for what still
/// needs syncing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub is_syncing: bool,
    pub pending_count: u64,
    pub last_sync_at: Option<DateTime<Utc>>,
    pub errors: Vec<String>,
}

/// Broadcasts status to any number of UI surfaces. A new subscriber sees the
/// current status immediately; dropping a receiver unsubscribes it without
/// affecting the others. One instance per session, cloned by reference.
#[derive(Clone)]
pub struct StatusPublisher {
    tx: Arc<watch::Sender<SyncStatus>>,
}

impl StatusPublisher {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SyncStatus::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> SyncStatus {
        self.tx.borrow().clone()
    }

    pub fn update(&self, apply: impl FnOnce(&mut SyncStatus)) {
        self.tx.send_modify(apply);
    }
}

impl Default for StatusPublisher {
    fn default() -> Self {
        Self::new()
    }
}
