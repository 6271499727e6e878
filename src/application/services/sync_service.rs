use crate::application::ports::connectivity::ConnectivityMonitor;
use crate::application::ports::repositories::Repository;
use crate::application::ports::transport::{RecordTransport, UploadEnvelope};
use crate::application::services::status_publisher::StatusPublisher;
use crate::domain::entities::{RetryDecision, SyncReport};
use crate::domain::value_objects::{RecordId, RecordKind};
use crate::shared::config::SyncConfig;
use crate::shared::error::{Result, SyncError};
use chrono::{Duration, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Drives synchronization passes. At most one pass runs at a time; a trigger
/// arriving mid-pass is dropped, not queued. Per-record upload failures go to
/// the retry queue and never abort the pass; only a store-level failure
/// does.
pub struct SyncService {
    store: Arc<dyn Repository>,
    transport: Arc<dyn RecordTransport>,
    connectivity: Arc<dyn ConnectivityMonitor>,
    status: StatusPublisher,
    config: SyncConfig,
    gate: Mutex<()>,
}

impl SyncService {
    pub fn new(
        store: Arc<dyn Repository>,
        transport: Arc<dyn RecordTransport>,
        connectivity: Arc<dyn ConnectivityMonitor>,
        status: StatusPublisher,
        config: SyncConfig,
    ) -> Self {
        Self {
            store,
            transport,
            connectivity,
            status,
            config,
            gate: Mutex::new(()),
        }
    }

    /// User-triggered sync. Unlike the automatic triggers this one fails
    /// loudly when the device is offline; reconnection will start a pass on
    /// its own, so nothing is scheduled.
    pub async fn force_sync(&self) -> Result<Option<SyncReport>> {
        if !self.connectivity.is_online() {
            return Err(SyncError::Offline);
        }
        self.run_pass().await
    }

    /// Returns `Ok(None)` when a pass was already in flight and this trigger
    /// was coalesced.
    pub async fn run_pass(&self) -> Result<Option<SyncReport>> {
        let Ok(_guard) = self.gate.try_lock() else {
            debug!(target: "sync", "pass already in flight, trigger coalesced");
            return Ok(None);
        };

        self.status.update(|status| {
            status.is_syncing = true;
            status.errors.clear();
        });

        match self.execute_pass().await {
            Ok((report, errors)) => {
                let finished_at = Utc::now();
                self.status.update(|status| {
                    status.is_syncing = false;
                    status.pending_count = report.pending_count;
                    status.last_sync_at = Some(finished_at);
                    status.errors = errors;
                });
                info!(
                    target: "sync",
                    synced = report.synced_count,
                    failed = report.failed_count,
                    pending = report.pending_count,
                    "sync pass completed"
                );
                Ok(Some(report))
            }
            Err(err) => {
                self.status.update(|status| {
                    status.is_syncing = false;
                    status.errors.push(err.to_string());
                });
                error!(target: "sync", error = %err, "sync pass aborted");
                Err(err)
            }
        }
    }

    /// Fire-and-forget trigger used by connectivity transitions and timers.
    pub fn trigger(self: &Arc<Self>) {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(err) = service.run_pass().await {
                error!(target: "sync", error = %err, "background sync pass failed");
            }
        });
    }

    /// Recompute the pending count outside a pass, for the periodic ticker.
    pub async fn refresh_status(&self) {
        match self.store.count_unsynced().await {
            Ok(pending) => self.status.update(|status| status.pending_count = pending),
            Err(err) => warn!(target: "sync", error = %err, "status refresh failed"),
        }
    }

    async fn execute_pass(&self) -> Result<(SyncReport, Vec<String>)> {
        let mut report = SyncReport::default();
        let mut errors = Vec::new();

        let pending_before = self.store.count_unsynced().await?;
        self.status
            .update(|status| status.pending_count = pending_before);

        // Records already in the retry queue belong to the retry loop; the
        // fresh-upload stage skips them so backoff is respected.
        let queued: HashSet<(RecordKind, String)> = self
            .store
            .list_retry_items()
            .await?
            .into_iter()
            .map(|item| (item.record_kind, item.record_id.to_string()))
            .collect();

        for kind in RecordKind::ALL {
            let batch = self.unsynced_envelopes(kind).await?;
            for envelope in batch {
                if queued.contains(&(kind, envelope.record_id.to_string())) {
                    continue;
                }
                self.upload_one(kind, envelope, &mut report, &mut errors)
                    .await?;
            }
        }

        self.process_retry_queue(&mut report, &mut errors).await?;

        report.pending_count = self.store.count_unsynced().await?;
        Ok((report, errors))
    }

    /// One upload attempt. A transport failure becomes a retry queue entry
    /// and the pass moves on; only store errors propagate.
    async fn upload_one(
        &self,
        kind: RecordKind,
        envelope: UploadEnvelope,
        report: &mut SyncReport,
        errors: &mut Vec<String>,
    ) -> Result<()> {
        let record_id = envelope.record_id.clone();
        match self.transport.upload(kind, envelope).await {
            Ok(()) => {
                self.mark_synced(kind, &record_id).await?;
                report.synced_count += 1;
            }
            Err(err) => {
                warn!(target: "sync", kind = %kind, id = %record_id, error = %err, "upload failed, queued for retry");
                self.store
                    .record_upload_failure(kind, &record_id, &err.to_string())
                    .await?;
                errors.push(format!("{kind} {record_id}: {err}"));
                report.failed_count += 1;
            }
        }
        Ok(())
    }

    async fn process_retry_queue(
        &self,
        report: &mut SyncReport,
        errors: &mut Vec<String>,
    ) -> Result<()> {
        let now = Utc::now();
        let backoff = Duration::seconds(self.config.min_backoff as i64);

        for item in self.store.list_retry_items().await? {
            match item.decide(now, self.config.max_attempts, backoff) {
                RetryDecision::Exhausted => {
                    debug!(target: "sync", id = %item.record_id, attempts = item.attempts, "retry ceiling reached, item retained");
                    continue;
                }
                RetryDecision::InBackoff => continue,
                RetryDecision::Due => {}
            }

            let Some((already_synced, envelope)) =
                self.fetch_envelope(item.record_kind, &item.record_id).await?
            else {
                // The record is gone; nothing left to upload.
                self.store.delete_retry_item(&item.id).await?;
                continue;
            };
            if already_synced {
                // Synced by another path since the failure was recorded.
                self.store.delete_retry_item(&item.id).await?;
                continue;
            }

            report.retried_count += 1;
            match self.transport.upload(item.record_kind, envelope).await {
                Ok(()) => {
                    self.mark_synced(item.record_kind, &item.record_id).await?;
                    self.store.delete_retry_item(&item.id).await?;
                    report.synced_count += 1;
                }
                Err(err) => {
                    warn!(target: "sync", kind = %item.record_kind, id = %item.record_id, attempt = item.attempts + 1, error = %err, "retry failed");
                    self.store
                        .record_upload_failure(item.record_kind, &item.record_id, &err.to_string())
                        .await?;
                    errors.push(format!("{} {}: {err}", item.record_kind, item.record_id));
                    report.failed_count += 1;
                }
            }
        }
        Ok(())
    }

    async fn unsynced_envelopes(&self, kind: RecordKind) -> Result<Vec<UploadEnvelope>> {
        let envelopes = match kind {
            RecordKind::Recording => self
                .store
                .list_unsynced_recordings()
                .await?
                .into_iter()
                .map(|r| UploadEnvelope {
                    record_id: r.id.clone(),
                    owner_id: r.owner_id.clone(),
                    payload: r.upload_payload(),
                })
                .collect(),
            RecordKind::Symptom => self
                .store
                .list_unsynced_symptoms()
                .await?
                .into_iter()
                .map(|s| UploadEnvelope {
                    record_id: s.id.clone(),
                    owner_id: s.owner_id.clone(),
                    payload: s.upload_payload(),
                })
                .collect(),
            RecordKind::Vitals => self
                .store
                .list_unsynced_vitals()
                .await?
                .into_iter()
                .map(|v| UploadEnvelope {
                    record_id: v.id.clone(),
                    owner_id: v.owner_id.clone(),
                    payload: v.upload_payload(),
                })
                .collect(),
            RecordKind::Report => self
                .store
                .list_unsynced_reports()
                .await?
                .into_iter()
                .map(|r| UploadEnvelope {
                    record_id: r.id.clone(),
                    owner_id: r.owner_id.clone(),
                    payload: r.upload_payload(),
                })
                .collect(),
            RecordKind::Logbook => self
                .store
                .list_unsynced_logbook_entries()
                .await?
                .into_iter()
                .map(|e| UploadEnvelope {
                    record_id: e.id.clone(),
                    owner_id: e.owner_id.clone(),
                    payload: e.upload_payload(),
                })
                .collect(),
        };
        Ok(envelopes)
    }

    async fn fetch_envelope(
        &self,
        kind: RecordKind,
        id: &RecordId,
    ) -> Result<Option<(bool, UploadEnvelope)>> {
        let fetched = match kind {
            RecordKind::Recording => self.store.get_recording(id).await?.map(|r| {
                (
                    r.synced,
                    UploadEnvelope {
                        record_id: r.id.clone(),
                        owner_id: r.owner_id.clone(),
                        payload: r.upload_payload(),
                    },
                )
            }),
            RecordKind::Symptom => self.store.get_symptom(id).await?.map(|s| {
                (
                    s.synced,
                    UploadEnvelope {
                        record_id: s.id.clone(),
                        owner_id: s.owner_id.clone(),
                        payload: s.upload_payload(),
                    },
                )
            }),
            RecordKind::Vitals => self.store.get_vitals(id).await?.map(|v| {
                (
                    v.synced,
                    UploadEnvelope {
                        record_id: v.id.clone(),
                        owner_id: v.owner_id.clone(),
                        payload: v.upload_payload(),
                    },
                )
            }),
            RecordKind::Report => self.store.get_report(id).await?.map(|r| {
                (
                    r.synced,
                    UploadEnvelope {
                        record_id: r.id.clone(),
                        owner_id: r.owner_id.clone(),
                        payload: r.upload_payload(),
                    },
                )
            }),
            RecordKind::Logbook => self.store.get_logbook_entry(id).await?.map(|e| {
                (
                    e.synced,
                    UploadEnvelope {
                        record_id: e.id.clone(),
                        owner_id: e.owner_id.clone(),
                        payload: e.upload_payload(),
                    },
                )
            }),
        };
        Ok(fetched)
    }

    async fn mark_synced(&self, kind: RecordKind, id: &RecordId) -> Result<()> {
        match kind {
            RecordKind::Recording => self.store.mark_recording_synced(id).await,
            RecordKind::Symptom => self.store.mark_symptom_synced(id).await,
            RecordKind::Vitals => self.store.mark_vitals_synced(id).await,
            RecordKind::Report => self.store.mark_report_synced(id).await,
            RecordKind::Logbook => self.store.mark_logbook_entry_synced(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::consent_service::ConsentService;
    use crate::application::services::record_service::RecordService;
    use crate::domain::entities::Recording;
    use crate::domain::value_objects::{ConsentType, OwnerId};
    use crate::infrastructure::connectivity::ManualConnectivity;
    use crate::infrastructure::database::{Database, SqliteRepository};
    use async_trait::async_trait;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex as StdMutex;

    struct ScriptedTransport {
        fail_all: AtomicBool,
        delay: Option<std::time::Duration>,
        uploads: StdMutex<Vec<String>>,
    }

    impl ScriptedTransport {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                fail_all: AtomicBool::new(false),
                delay: None,
                uploads: StdMutex::new(Vec::new()),
            })
        }

        fn slow(delay: std::time::Duration) -> Arc<Self> {
            Arc::new(Self {
                fail_all: AtomicBool::new(false),
                delay: Some(delay),
                uploads: StdMutex::new(Vec::new()),
            })
        }

        fn set_failing(&self, failing: bool) {
            self.fail_all.store(failing, Ordering::SeqCst);
        }

        fn upload_count(&self) -> usize {
            self.uploads.lock().unwrap().len()
        }

        fn uploads_of(&self, id: &str) -> usize {
            self.uploads
                .lock()
                .unwrap()
                .iter()
                .filter(|u| u.as_str() == id)
                .count()
        }
    }

    #[async_trait]
    impl RecordTransport for ScriptedTransport {
        async fn upload(&self, _kind: RecordKind, envelope: UploadEnvelope) -> Result<()> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.uploads
                .lock()
                .unwrap()
                .push(envelope.record_id.to_string());
            if self.fail_all.load(Ordering::SeqCst) {
                return Err(SyncError::Upload("scripted failure".into()));
            }
            Ok(())
        }
    }

    struct Harness {
        sync: Arc<SyncService>,
        records: RecordService,
        consent: Arc<ConsentService>,
        status: StatusPublisher,
        connectivity: Arc<ManualConnectivity>,
        store: Arc<dyn Repository>,
    }

    fn test_config(min_backoff: u64) -> SyncConfig {
        SyncConfig {
            auto_sync: false,
            sync_interval: 300,
            status_refresh_interval: 10,
            max_attempts: 5,
            min_backoff,
        }
    }

    async fn setup(transport: Arc<ScriptedTransport>, config: SyncConfig) -> Harness {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        Database::run_migrations(&pool).await.unwrap();

        let store: Arc<dyn Repository> = Arc::new(SqliteRepository::new(pool));
        let status = StatusPublisher::new();
        let consent = Arc::new(ConsentService::new(store.clone()));
        let records = RecordService::new(store.clone(), consent.clone(), status.clone());
        let connectivity = Arc::new(ManualConnectivity::new(true));
        let sync = Arc::new(SyncService::new(
            store.clone(),
            transport,
            connectivity.clone(),
            status.clone(),
            config,
        ));

        Harness {
            sync,
            records,
            consent,
            status,
            connectivity,
            store,
        }
    }

    async fn consented_recording(harness: &Harness, owner: &str) -> Recording {
        let owner = OwnerId::new(owner).unwrap();
        harness
            .consent
            .grant(owner.clone(), ConsentType::Recording, "ta".into())
            .await
            .unwrap();
        harness
            .records
            .create_recording(owner, vec![1, 2, 3], "ta".into())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn force_sync_fails_offline() {
        let harness = setup(ScriptedTransport::new(), test_config(30)).await;
        harness.connectivity.set_online(false);

        let err = harness.sync.force_sync().await.unwrap_err();
        assert!(matches!(err, SyncError::Offline));
        assert!(!harness.status.current().is_syncing);
    }

    #[tokio::test]
    async fn successful_pass_marks_everything_synced() {
        let transport = ScriptedTransport::new();
        let harness = setup(transport.clone(), test_config(30)).await;
        let recording = consented_recording(&harness, "p1").await;

        let report = harness.sync.force_sync().await.unwrap().unwrap();

        assert_eq!(report.synced_count, 1);
        assert_eq!(report.failed_count, 0);
        assert_eq!(report.pending_count, 0);
        assert_eq!(transport.uploads_of(recording.id.as_str()), 1);

        let stored = harness.store.get_recording(&recording.id).await.unwrap().unwrap();
        assert!(stored.synced);
        assert!(stored.synced_at.is_some());

        let status = harness.status.current();
        assert!(!status.is_syncing);
        assert_eq!(status.pending_count, 0);
        assert!(status.last_sync_at.is_some());
        assert!(status.errors.is_empty());
    }

    #[tokio::test]
    async fn concurrent_triggers_run_exactly_one_pass() {
        let transport = ScriptedTransport::slow(std::time::Duration::from_millis(100));
        let harness = setup(transport.clone(), test_config(30)).await;
        consented_recording(&harness, "p1").await;

        let (first, second) = tokio::join!(harness.sync.force_sync(), harness.sync.force_sync());

        let reports = [first.unwrap(), second.unwrap()];
        assert_eq!(reports.iter().filter(|r| r.is_some()).count(), 1);
        assert_eq!(reports.iter().filter(|r| r.is_none()).count(), 1);
        assert_eq!(transport.upload_count(), 1);
    }

    #[tokio::test]
    async fn failed_upload_lands_in_retry_queue_with_backoff() {
        let transport = ScriptedTransport::new();
        transport.set_failing(true);
        let harness = setup(transport.clone(), test_config(30)).await;
        let recording = consented_recording(&harness, "p1").await;

        let report = harness.sync.force_sync().await.unwrap().unwrap();
        assert_eq!(report.failed_count, 1);
        assert_eq!(report.pending_count, 1);

        let items = harness.store.list_retry_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].record_id, recording.id);
        assert_eq!(items[0].attempts, 1);
        assert!(items[0].last_error.as_deref().unwrap().contains("scripted"));

        // Second pass inside the backoff window: the record is skipped
        // entirely, attempts stay put.
        harness.sync.force_sync().await.unwrap().unwrap();
        let items = harness.store.list_retry_items().await.unwrap();
        assert_eq!(items[0].attempts, 1);
        assert_eq!(transport.upload_count(), 1);

        let status = harness.status.current();
        assert_eq!(status.pending_count, 1);
    }

    #[tokio::test]
    async fn retry_ceiling_stops_attempts() {
        let transport = ScriptedTransport::new();
        transport.set_failing(true);
        let harness = setup(transport.clone(), test_config(0)).await;
        let recording = consented_recording(&harness, "p1").await;

        for _ in 0..6 {
            harness.sync.force_sync().await.unwrap().unwrap();
        }

        let items = harness.store.list_retry_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].attempts, 5);
        // Initial attempt plus four queue retries; the sixth pass skips it.
        assert_eq!(transport.uploads_of(recording.id.as_str()), 5);
    }

    #[tokio::test]
    async fn retry_succeeds_after_transport_recovers() {
        let transport = ScriptedTransport::new();
        transport.set_failing(true);
        let harness = setup(transport.clone(), test_config(0)).await;
        let recording = consented_recording(&harness, "p1").await;

        harness.sync.force_sync().await.unwrap().unwrap();
        transport.set_failing(false);
        let report = harness.sync.force_sync().await.unwrap().unwrap();

        assert_eq!(report.retried_count, 1);
        assert_eq!(report.synced_count, 1);
        assert_eq!(report.pending_count, 0);
        assert!(harness.store.list_retry_items().await.unwrap().is_empty());

        let stored = harness.store.get_recording(&recording.id).await.unwrap().unwrap();
        assert!(stored.synced);
    }

    #[tokio::test]
    async fn retry_item_dropped_when_record_synced_elsewhere() {
        let transport = ScriptedTransport::new();
        transport.set_failing(true);
        let harness = setup(transport.clone(), test_config(0)).await;
        let recording = consented_recording(&harness, "p1").await;

        harness.sync.force_sync().await.unwrap().unwrap();
        assert_eq!(harness.store.list_retry_items().await.unwrap().len(), 1);

        // Another path marks the record synced before the next pass.
        harness
            .store
            .mark_recording_synced(&recording.id)
            .await
            .unwrap();

        transport.set_failing(false);
        let uploads_before = transport.upload_count();
        harness.sync.force_sync().await.unwrap().unwrap();

        assert!(harness.store.list_retry_items().await.unwrap().is_empty());
        assert_eq!(transport.upload_count(), uploads_before);
    }

    #[tokio::test]
    async fn mark_synced_twice_is_a_no_op() {
        let transport = ScriptedTransport::new();
        let harness = setup(transport, test_config(30)).await;
        let recording = consented_recording(&harness, "p1").await;

        harness
            .store
            .mark_recording_synced(&recording.id)
            .await
            .unwrap();
        let first = harness.store.get_recording(&recording.id).await.unwrap().unwrap();

        harness
            .store
            .mark_recording_synced(&recording.id)
            .await
            .unwrap();
        let second = harness.store.get_recording(&recording.id).await.unwrap().unwrap();

        assert_eq!(first.synced_at, second.synced_at);
        assert_eq!(harness.store.count_unsynced().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn per_record_failure_does_not_block_others() {
        // Vitals have no consent gate, so two owners can race a flaky
        // transport without extra setup.
        let transport = ScriptedTransport::new();
        let harness = setup(transport.clone(), test_config(30)).await;

        consented_recording(&harness, "p1").await;
        harness
            .records
            .create_vitals(
                OwnerId::new("p2").unwrap(),
                crate::domain::entities::VitalSigns {
                    temperature: Some(37.2),
                    ..Default::default()
                },
                crate::domain::value_objects::EnteredBy::Patient,
                None,
            )
            .await
            .unwrap();

        transport.set_failing(true);
        let report = harness.sync.force_sync().await.unwrap().unwrap();

        // Both records were attempted despite both failing.
        assert_eq!(report.failed_count, 2);
        assert_eq!(transport.upload_count(), 2);
        assert_eq!(harness.store.list_retry_items().await.unwrap().len(), 2);
        assert_eq!(harness.status.current().errors.len(), 2);
    }
}
