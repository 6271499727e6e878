use crate::domain::value_objects::{EnteredBy, OwnerId, RecordId, RecordKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Raw measured values. Nothing in this crate interprets, compares, or
/// alerts on them; they are stored and uploaded exactly as entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    pub bp_systolic: Option<f64>,
    pub bp_diastolic: Option<f64>,
    pub temperature: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub id: RecordId,
    pub owner_id: OwnerId,
    pub signs: VitalSigns,
    pub entered_by: EnteredBy,
    pub symptom_id: Option<RecordId>,
    pub synced: bool,
    pub created_at: DateTime<Utc>,
    pub synced_at: Option<DateTime<Utc>>,
}

impl Vitals {
    pub fn new(
        owner_id: OwnerId,
        signs: VitalSigns,
        entered_by: EnteredBy,
        symptom_id: Option<RecordId>,
    ) -> Self {
        Self {
            id: RecordId::generate(RecordKind::Vitals.as_str()),
            owner_id,
            signs,
            entered_by,
            symptom_id,
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
            "bp_systolic": self.signs.bp_systolic,
            "bp_diastolic": self.signs.bp_diastolic,
            "temperature": self.signs.temperature,
            "weight": self.signs.weight,
            "entered_by": self.entered_by.role_str(),
            "entered_by_uid": self.entered_by.worker_uid(),
            "symptom_id": self.symptom_id.as_ref().map(RecordId::as_str),
            "created_at": self.created_at.timestamp_millis(),
        })
    }
}
