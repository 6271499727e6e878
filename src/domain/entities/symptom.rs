use crate::domain::value_objects::{OwnerId, RecordId, RecordKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A free-text symptom description entered by the patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: RecordId,
    pub owner_id: OwnerId,
    pub text: String,
    pub language: String,
    pub consent_id: RecordId,
    pub synced: bool,
    pub created_at: DateTime<Utc>,
    pub synced_at: Option<DateTime<Utc>>,
}

impl Symptom {
    pub fn new(owner_id: OwnerId, text: String, language: String, consent_id: RecordId) -> Self {
        Self {
            id: RecordId::generate(RecordKind::Symptom.as_str()),
            owner_id,
            text,
            language,
            consent_id,
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
            "text": self.text,
            "language": self.language,
            "consent_id": self.consent_id.as_str(),
            "created_at": self.created_at.timestamp_millis(),
        })
    }
}
