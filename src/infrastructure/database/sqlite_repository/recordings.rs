use super::mapper::map_recording_row;
use super::queries::{
    INSERT_RECORDING, MARK_RECORDING_SYNCED, SELECT_RECORDINGS_BY_OWNER, SELECT_RECORDING_BY_ID,
    SELECT_UNSYNCED_RECORDINGS,
};
use super::SqliteRepository;
use crate::application::ports::repositories::RecordingRepository;
use crate::domain::entities::Recording;
use crate::domain::value_objects::{OwnerId, RecordId};
use crate::shared::error::Result;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl RecordingRepository for SqliteRepository {
    async fn create_recording(&self, recording: &Recording) -> Result<()> {
        sqlx::query(INSERT_RECORDING)
            .bind(recording.id.as_str())
            .bind(recording.owner_id.as_str())
            .bind(&recording.audio)
            .bind(&recording.language)
            .bind(recording.consent_id.as_str())
            .bind(recording.synced)
            .bind(recording.created_at.timestamp_millis())
            .bind(recording.synced_at.map(|t| t.timestamp_millis()))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_recording(&self, id: &RecordId) -> Result<Option<Recording>> {
        let row = sqlx::query(SELECT_RECORDING_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_recording_row).transpose()
    }

    async fn list_unsynced_recordings(&self) -> Result<Vec<Recording>> {
        let rows = sqlx::query(SELECT_UNSYNCED_RECORDINGS)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_recording_row).collect()
    }

    async fn list_recordings_by_owner(&self, owner: &OwnerId) -> Result<Vec<Recording>> {
        let rows = sqlx::query(SELECT_RECORDINGS_BY_OWNER)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_recording_row).collect()
    }

    async fn mark_recording_synced(&self, id: &RecordId) -> Result<()> {
        // No-op when already synced; the guard keeps the call idempotent.
        sqlx::query(MARK_RECORDING_SYNCED)
            .bind(id.as_str())
            .bind(Utc::now().timestamp_millis())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
