use crate::domain::value_objects::{OwnerId, RecordId, RecordKind};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A captured audio recording. The payload is immutable after creation; only
/// the sync flag ever changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub id: RecordId,
    pub owner_id: OwnerId,
    pub audio: Vec<u8>,
    pub language: String,
    pub consent_id: RecordId,
    pub synced: bool,
    pub created_at: DateTime<Utc>,
    pub synced_at: Option<DateTime<Utc>>,
}

impl Recording {
    pub fn new(owner_id: OwnerId, audio: Vec<u8>, language: String, consent_id: RecordId) -> Self {
        Self {
            id: RecordId::generate(RecordKind::Recording.as_str()),
            owner_id,
            audio,
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
            "language": self.language,
            "consent_id": self.consent_id.as_str(),
            "audio_base64": BASE64.encode(&self.audio),
            "created_at": self.created_at.timestamp_millis(),
        })
    }
}
