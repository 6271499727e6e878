use super::mapper::map_logbook_row;
use super::queries::{
    INSERT_LOGBOOK_ENTRY, MARK_LOGBOOK_ENTRY_SYNCED, SELECT_LOGBOOK_ENTRIES_BY_OWNER,
    SELECT_LOGBOOK_ENTRY_BY_ID, SELECT_UNSYNCED_LOGBOOK_ENTRIES, SET_LOGBOOK_ENTRY_SHARED,
};
use super::SqliteRepository;
use crate::application::ports::repositories::LogbookRepository;
use crate::domain::entities::LogbookEntry;
use crate::domain::value_objects::{OwnerId, RecordId};
use crate::shared::error::Result;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl LogbookRepository for SqliteRepository {
    async fn create_logbook_entry(&self, entry: &LogbookEntry) -> Result<()> {
        let summary_json = serde_json::to_string(&entry.summary)?;
        sqlx::query(INSERT_LOGBOOK_ENTRY)
            .bind(entry.id.as_str())
            .bind(entry.owner_id.as_str())
            .bind(summary_json)
            .bind(&entry.language)
            .bind(entry.consent_id.as_str())
            .bind(entry.shared_with_doctor)
            .bind(entry.synced)
            .bind(entry.created_at.timestamp_millis())
            .bind(entry.synced_at.map(|t| t.timestamp_millis()))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_logbook_entry(&self, id: &RecordId) -> Result<Option<LogbookEntry>> {
        let row = sqlx::query(SELECT_LOGBOOK_ENTRY_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_logbook_row).transpose()
    }

    async fn list_unsynced_logbook_entries(&self) -> Result<Vec<LogbookEntry>> {
        let rows = sqlx::query(SELECT_UNSYNCED_LOGBOOK_ENTRIES)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_logbook_row).collect()
    }

    async fn list_logbook_entries_by_owner(&self, owner: &OwnerId) -> Result<Vec<LogbookEntry>> {
        let rows = sqlx::query(SELECT_LOGBOOK_ENTRIES_BY_OWNER)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_logbook_row).collect()
    }

    async fn mark_logbook_entry_synced(&self, id: &RecordId) -> Result<()> {
        sqlx::query(MARK_LOGBOOK_ENTRY_SYNCED)
            .bind(id.as_str())
            .bind(Utc::now().timestamp_millis())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_logbook_entry_shared(&self, id: &RecordId, shared: bool) -> Result<()> {
        sqlx::query(SET_LOGBOOK_ENTRY_SHARED)
            .bind(id.as_str())
            .bind(shared)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
