use crate::domain::value_objects::{ConsentType, OwnerId, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the append-only consent log. Grants are never mutated or
/// deleted; the most recent grant of a type for an owner is authoritative,
/// and a revocation is itself a grant with `granted = false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentGrant {
    pub id: RecordId,
    pub owner_id: OwnerId,
    pub consent_type: ConsentType,
    pub granted: bool,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

impl ConsentGrant {
    pub fn granted(owner_id: OwnerId, consent_type: ConsentType, language: String) -> Self {
        Self::record(owner_id, consent_type, true, language)
    }

    pub fn revoked(owner_id: OwnerId, consent_type: ConsentType, language: String) -> Self {
        Self::record(owner_id, consent_type, false, language)
    }

    fn record(
        owner_id: OwnerId,
        consent_type: ConsentType,
        granted: bool,
        language: String,
    ) -> Self {
        Self {
            id: RecordId::generate("consent"),
            owner_id,
            consent_type,
            granted,
            language,
            created_at: Utc::now(),
        }
    }
}
