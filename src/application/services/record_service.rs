use crate::application::ports::repositories::Repository;
use crate::application::services::consent_service::ConsentService;
use crate::application::services::status_publisher::StatusPublisher;
use crate::domain::entities::{
    LogbookEntry, Recording, Report, StructuredSummary, Symptom, Vitals, VitalSigns,
};
use crate::domain::value_objects::{ConsentType, EnteredBy, OwnerId, RecordId};
use crate::shared::error::{Result, SyncError};
use std::sync::Arc;
use tracing::{info, warn};

/// The creation boundary for patient data: consent gate first, then a
/// durable local write, never any network. The consent check and the write
/// are not atomic: a revocation racing an in-flight creation may lose, and
/// that race is accepted.
pub struct RecordService {
    store: Arc<dyn Repository>,
    consent: Arc<ConsentService>,
    status: StatusPublisher,
}

impl RecordService {
    pub fn new(
        store: Arc<dyn Repository>,
        consent: Arc<ConsentService>,
        status: StatusPublisher,
    ) -> Self {
        Self {
            store,
            consent,
            status,
        }
    }

    pub async fn create_recording(
        &self,
        owner: OwnerId,
        audio: Vec<u8>,
        language: String,
    ) -> Result<Recording> {
        let grant = self
            .consent
            .require_consent(&owner, ConsentType::Recording)
            .await?;
        let recording = Recording::new(owner, audio, language, grant.id);
        self.store.create_recording(&recording).await?;
        info!(target: "records", id = %recording.id, "recording stored locally");
        self.refresh_pending().await;
        Ok(recording)
    }

    pub async fn create_symptom(
        &self,
        owner: OwnerId,
        text: String,
        language: String,
    ) -> Result<Symptom> {
        let grant = self
            .consent
            .require_consent(&owner, ConsentType::Recording)
            .await?;
        let symptom = Symptom::new(owner, text, language, grant.id);
        self.store.create_symptom(&symptom).await?;
        info!(target: "records", id = %symptom.id, "symptom stored locally");
        self.refresh_pending().await;
        Ok(symptom)
    }

    /// Vitals are raw values captured by the patient or an assisting health
    /// worker; no consent grant gates their creation.
    pub async fn create_vitals(
        &self,
        owner: OwnerId,
        signs: VitalSigns,
        entered_by: EnteredBy,
        symptom_id: Option<RecordId>,
    ) -> Result<Vitals> {
        let vitals = Vitals::new(owner, signs, entered_by, symptom_id);
        self.store.create_vitals(&vitals).await?;
        info!(target: "records", id = %vitals.id, "vitals stored locally");
        self.refresh_pending().await;
        Ok(vitals)
    }

    pub async fn create_report(
        &self,
        owner: OwnerId,
        file_name: String,
        file_type: String,
        file_size: u64,
        uploaded_by: EnteredBy,
        symptom_id: Option<RecordId>,
    ) -> Result<Report> {
        let report = Report::new(owner, file_name, file_type, file_size, uploaded_by, symptom_id);
        self.store.create_report(&report).await?;
        info!(target: "records", id = %report.id, "report metadata stored locally");
        self.refresh_pending().await;
        Ok(report)
    }

    pub async fn create_logbook_entry(
        &self,
        owner: OwnerId,
        summary: StructuredSummary,
        language: String,
    ) -> Result<LogbookEntry> {
        let grant = self
            .consent
            .require_consent(&owner, ConsentType::Recording)
            .await?;
        let entry = LogbookEntry::new(owner, summary, language, grant.id);
        self.store.create_logbook_entry(&entry).await?;
        info!(target: "records", id = %entry.id, "logbook entry stored locally");
        self.refresh_pending().await;
        Ok(entry)
    }

    /// Explicit patient action; requires a current doctor-sharing grant.
    /// Until this flips, the report never appears in doctor-visible data.
    pub async fn approve_report_sharing(&self, owner: &OwnerId, id: &RecordId) -> Result<()> {
        let report = self
            .store
            .get_report(id)
            .await?
            .filter(|report| report.owner_id == *owner)
            .ok_or_else(|| SyncError::NotFound(format!("report {id}")))?;
        self.consent
            .require_consent(owner, ConsentType::DoctorSharing)
            .await?;
        self.store.approve_report_for_sharing(&report.id).await?;
        info!(target: "records", id = %report.id, "report approved for sharing");
        Ok(())
    }

    /// Sharing state is independent of sync state. Turning sharing on
    /// requires a current doctor-sharing grant; turning it off never does.
    pub async fn set_logbook_shared(
        &self,
        owner: &OwnerId,
        id: &RecordId,
        shared: bool,
    ) -> Result<()> {
        let entry = self
            .store
            .get_logbook_entry(id)
            .await?
            .filter(|entry| entry.owner_id == *owner)
            .ok_or_else(|| SyncError::NotFound(format!("logbook entry {id}")))?;
        if shared {
            self.consent
                .require_consent(owner, ConsentType::DoctorSharing)
                .await?;
        }
        self.store.set_logbook_entry_shared(&entry.id, shared).await
    }

    pub async fn list_recordings(&self, owner: &OwnerId) -> Result<Vec<Recording>> {
        self.store.list_recordings_by_owner(owner).await
    }

    pub async fn list_symptoms(&self, owner: &OwnerId) -> Result<Vec<Symptom>> {
        self.store.list_symptoms_by_owner(owner).await
    }

    pub async fn list_vitals(&self, owner: &OwnerId) -> Result<Vec<Vitals>> {
        self.store.list_vitals_by_owner(owner).await
    }

    pub async fn list_reports(&self, owner: &OwnerId) -> Result<Vec<Report>> {
        self.store.list_reports_by_owner(owner).await
    }

    /// Newest-first, the logbook's display order.
    pub async fn list_logbook_entries(&self, owner: &OwnerId) -> Result<Vec<LogbookEntry>> {
        self.store.list_logbook_entries_by_owner(owner).await
    }

    /// Event-driven status poke after a successful write. The record is
    /// already durable, so a failed recount only degrades the status view.
    async fn refresh_pending(&self) {
        match self.store.count_unsynced().await {
            Ok(pending) => self.status.update(|status| status.pending_count = pending),
            Err(err) => {
                warn!(target: "records", error = %err, "failed to refresh pending count")
            }
        }
    }
}
