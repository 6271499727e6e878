// Shared between the integration test binaries; not every binary uses every
// helper.
#![allow(dead_code)]

use async_trait::async_trait;
use carevista_sync::{
    AppConfig, RecordKind, RecordTransport, Result, SyncEngine, SyncError, UploadEnvelope,
};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// Transport scripted per record id: uploads succeed unless the id is in the
/// failing set. Every call is recorded for assertions.
pub struct ScriptedTransport {
    failing: Mutex<HashSet<String>>,
    uploads: Mutex<Vec<(RecordKind, String)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            failing: Mutex::new(HashSet::new()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_record(&self, id: &str) {
        self.failing.lock().unwrap().insert(id.to_string());
    }

    pub fn recover_record(&self, id: &str) {
        self.failing.lock().unwrap().remove(id);
    }

    pub fn uploads(&self) -> Vec<(RecordKind, String)> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn uploads_of(&self, id: &str) -> usize {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, uploaded)| uploaded == id)
            .count()
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordTransport for ScriptedTransport {
    async fn upload(&self, kind: RecordKind, envelope: UploadEnvelope) -> Result<()> {
        let id = envelope.record_id.to_string();
        self.uploads.lock().unwrap().push((kind, id.clone()));
        if self.failing.lock().unwrap().contains(&id) {
            return Err(SyncError::Upload(format!("scripted failure for {id}")));
        }
        Ok(())
    }
}

/// Block until the engine has finished a sync pass and gone idle. Used after
/// starting an engine online (the startup pass runs in the background) and
/// after connectivity transitions, so tests never race a scheduled pass.
pub async fn wait_for_idle(engine: &SyncEngine) {
    let mut status_rx = engine.subscribe_status();
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let status = status_rx.borrow();
                if !status.is_syncing && status.last_sync_at.is_some() {
                    break;
                }
            }
            status_rx.changed().await.unwrap();
        }
    })
    .await
    .expect("sync pass did not finish in time");
}

/// Config for a file-backed store under the given temp directory, with the
/// background timers effectively parked so tests stay deterministic.
pub fn test_config(dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.data_dir = dir.display().to_string();
    config.database.url = format!("sqlite://{}/carevista-test.db", dir.display());
    config.database.max_connections = 1;
    config.sync.auto_sync = false;
    config.sync.status_refresh_interval = 3600;
    config.sync.min_backoff = 0;
    config
}
