use crate::domain::value_objects::{OwnerId, RecordId, RecordKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// The structured shape of an assisted symptom summary. Summaries structure
/// what the patient said; they never diagnose or recommend treatment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredSummary {
    pub chief_complaint: String,
    pub symptom_timeline: String,
    pub severity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

/// One logbook entry. `shared_with_doctor` is display state, mutated
/// independently of the sync flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogbookEntry {
    pub id: RecordId,
    pub owner_id: OwnerId,
    pub summary: StructuredSummary,
    pub language: String,
    pub consent_id: RecordId,
    pub shared_with_doctor: bool,
    pub synced: bool,
    pub created_at: DateTime<Utc>,
    pub synced_at: Option<DateTime<Utc>>,
}

impl LogbookEntry {
    pub fn new(
        owner_id: OwnerId,
        summary: StructuredSummary,
        language: String,
        consent_id: RecordId,
    ) -> Self {
        Self {
            id: RecordId::generate(RecordKind::Logbook.as_str()),
            owner_id,
            summary,
            language,
            consent_id,
            shared_with_doctor: false,
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
            "summary": self.summary,
            "language": self.language,
            "consent_id": self.consent_id.as_str(),
            "shared_with_doctor": self.shared_with_doctor,
            "created_at": self.created_at.timestamp_millis(),
        })
    }
}
