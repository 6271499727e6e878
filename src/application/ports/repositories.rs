use crate::domain::entities::{
    ConsentGrant, LogbookEntry, Recording, Report, RetryQueueItem, Symptom, Vitals,
};
use crate::domain::value_objects::{ConsentType, OwnerId, RecordId, RecordKind};
use crate::shared::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ConsentRepository: Send + Sync {
    async fn append_grant(&self, grant: &ConsentGrant) -> Result<()>;
    /// Most recent grant of the type for the owner, if any.
    async fn latest_grant(
        &self,
        owner: &OwnerId,
        consent_type: ConsentType,
    ) -> Result<Option<ConsentGrant>>;
    async fn list_grants(&self, owner: &OwnerId) -> Result<Vec<ConsentGrant>>;
}

#[async_trait]
pub trait RecordingRepository: Send + Sync {
    async fn create_recording(&self, recording: &Recording) -> Result<()>;
    async fn get_recording(&self, id: &RecordId) -> Result<Option<Recording>>;
    async fn list_unsynced_recordings(&self) -> Result<Vec<Recording>>;
    async fn list_recordings_by_owner(&self, owner: &OwnerId) -> Result<Vec<Recording>>;
    async fn mark_recording_synced(&self, id: &RecordId) -> Result<()>;
}

#[async_trait]
pub trait SymptomRepository: Send + Sync {
    async fn create_symptom(&self, symptom: &Symptom) -> Result<()>;
    async fn get_symptom(&self, id: &RecordId) -> Result<Option<Symptom>>;
    async fn list_unsynced_symptoms(&self) -> Result<Vec<Symptom>>;
    async fn list_symptoms_by_owner(&self, owner: &OwnerId) -> Result<Vec<Symptom>>;
    async fn mark_symptom_synced(&self, id: &RecordId) -> Result<()>;
}

#[async_trait]
pub trait VitalsRepository: Send + Sync {
    async fn create_vitals(&self, vitals: &Vitals) -> Result<()>;
    async fn get_vitals(&self, id: &RecordId) -> Result<Option<Vitals>>;
    async fn list_unsynced_vitals(&self) -> Result<Vec<Vitals>>;
    async fn list_vitals_by_owner(&self, owner: &OwnerId) -> Result<Vec<Vitals>>;
    async fn mark_vitals_synced(&self, id: &RecordId) -> Result<()>;
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn create_report(&self, report: &Report) -> Result<()>;
    async fn get_report(&self, id: &RecordId) -> Result<Option<Report>>;
    async fn list_unsynced_reports(&self) -> Result<Vec<Report>>;
    async fn list_reports_by_owner(&self, owner: &OwnerId) -> Result<Vec<Report>>;
    async fn mark_report_synced(&self, id: &RecordId) -> Result<()>;
    async fn approve_report_for_sharing(&self, id: &RecordId) -> Result<()>;
}

#[async_trait]
pub trait LogbookRepository: Send + Sync {
    async fn create_logbook_entry(&self, entry: &LogbookEntry) -> Result<()>;
    async fn get_logbook_entry(&self, id: &RecordId) -> Result<Option<LogbookEntry>>;
    async fn list_unsynced_logbook_entries(&self) -> Result<Vec<LogbookEntry>>;
    /// Newest-first: the logbook is a reverse-chronological display surface.
    async fn list_logbook_entries_by_owner(&self, owner: &OwnerId) -> Result<Vec<LogbookEntry>>;
    async fn mark_logbook_entry_synced(&self, id: &RecordId) -> Result<()>;
    async fn set_logbook_entry_shared(&self, id: &RecordId, shared: bool) -> Result<()>;
}

#[async_trait]
pub trait RetryQueueRepository: Send + Sync {
    /// Insert a new item with `attempts = 1`, or bump an existing one for
    /// the same record: increment attempts, restamp, replace the error.
    async fn record_upload_failure(
        &self,
        kind: RecordKind,
        record_id: &RecordId,
        error: &str,
    ) -> Result<()>;
    async fn list_retry_items(&self) -> Result<Vec<RetryQueueItem>>;
    async fn delete_retry_item(&self, id: &str) -> Result<()>;
}

/// The full persistence surface of the engine, implemented by one store.
#[async_trait]
pub trait Repository:
    ConsentRepository
    + RecordingRepository
    + SymptomRepository
    + VitalsRepository
    + ReportRepository
    + LogbookRepository
    + RetryQueueRepository
{
    async fn initialize(&self) -> Result<()>;
    async fn health_check(&self) -> Result<bool>;
    /// Unsynced records across every kind; the source of truth for the
    /// pending count the status publisher reports.
    async fn count_unsynced(&self) -> Result<u64>;
}
