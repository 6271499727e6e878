use crate::domain::value_objects::{EnteredBy, OwnerId, RecordId, RecordKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Metadata for an uploaded report or image. The file body is stored outside
/// this subsystem. A report is never visible to a doctor until the patient
/// explicitly flips `approved_for_sharing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: RecordId,
    pub owner_id: OwnerId,
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub uploaded_by: EnteredBy,
    pub symptom_id: Option<RecordId>,
    pub approved_for_sharing: bool,
    pub synced: bool,
    pub created_at: DateTime<Utc>,
    pub synced_at: Option<DateTime<Utc>>,
}

impl Report {
    pub fn new(
        owner_id: OwnerId,
        file_name: String,
        file_type: String,
        file_size: u64,
        uploaded_by: EnteredBy,
        symptom_id: Option<RecordId>,
    ) -> Self {
        Self {
            id: RecordId::generate(RecordKind::Report.as_str()),
            owner_id,
            file_name,
            file_type,
            file_size,
            uploaded_by,
            symptom_id,
            approved_for_sharing: false,
            synced: false,
            created_at: Utc::now(),
            synced_at: None,
        }
    }

    pub fn mark_synced(&mut self, synced_at: DateTime<Utc>) {
        self.synced = true;
        self.synced_at = Some(synced_at);
    }

    pub fn upload_payload(&self) -> serde_json::Value {
        json!({
            "id": self.id.as_str(),
            "patient_uid": self.owner_id.as_str(),
            "file_name": self.file_name,
            "file_type": self.file_type,
            "file_size": self.file_size,
            "uploaded_by": self.uploaded_by.role_str(),
            "uploaded_by_uid": self.uploaded_by.worker_uid(),
            "symptom_id": self.symptom_id.as_ref().map(RecordId::as_str),
            "approved_for_sharing": self.approved_for_sharing,
            "created_at": self.created_at.timestamp_millis(),
        })
    }
}
