use crate::domain::value_objects::{OwnerId, RecordId, RecordKind};
use crate::shared::error::Result;
use async_trait::async_trait;

/// One record, ready for upload: its id, owner, and full payload. The remote
/// side deduplicates by record id, so repeating an upload is safe.
#[derive(Debug, Clone)]
pub struct UploadEnvelope {
    pub record_id: RecordId,
    pub owner_id: OwnerId,
    pub payload: serde_json::Value,
}

/// The authenticated upload channel. Implemented outside this crate; the
/// engine only assumes one upload call per record and idempotency by id.
/// Timeouts are the transport's concern and surface as ordinary failures.
#[async_trait]
pub trait RecordTransport: Send + Sync {
    async fn upload(&self, kind: RecordKind, envelope: UploadEnvelope) -> Result<()>;
}
