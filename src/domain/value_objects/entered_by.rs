use crate::domain::value_objects::OwnerId;
use serde::{Deserialize, Serialize};

/// Who captured a vitals entry or uploaded a report: the patient themselves,
/// or an assisting health worker identified by their own uid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum EnteredBy {
    Patient,
    HealthWorker { worker_id: OwnerId },
}

impl EnteredBy {
    pub fn role_str(&self) -> &str {
        match self {
            EnteredBy::Patient => "patient",
            EnteredBy::HealthWorker { .. } => "health_worker",
        }
    }

    pub fn worker_uid(&self) -> Option<&str> {
        match self {
            EnteredBy::Patient => None,
            EnteredBy::HealthWorker { worker_id } => Some(worker_id.as_str()),
        }
    }

    pub fn from_columns(role: &str, worker_uid: Option<String>) -> Result<Self, String> {
        match role {
            "patient" => Ok(EnteredBy::Patient),
            "health_worker" => {
                let uid = worker_uid
                    .ok_or_else(|| "health_worker entry is missing the worker uid".to_string())?;
                Ok(EnteredBy::HealthWorker {
                    worker_id: OwnerId::new(uid)?,
                })
            }
            other => Err(format!("Unknown entered_by role: {other}")),
        }
    }
}
