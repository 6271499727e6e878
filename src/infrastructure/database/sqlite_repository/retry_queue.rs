use super::mapper::map_retry_row;
use super::queries::{DELETE_RETRY_ITEM, SELECT_RETRY_ITEMS, UPSERT_RETRY_ITEM};
use super::SqliteRepository;
use crate::application::ports::repositories::RetryQueueRepository;
use crate::domain::entities::RetryQueueItem;
use crate::domain::value_objects::{RecordId, RecordKind};
use crate::shared::error::Result;
use async_trait::async_trait;

#[async_trait]
impl RetryQueueRepository for SqliteRepository {
    async fn record_upload_failure(
        &self,
        kind: RecordKind,
        record_id: &RecordId,
        error: &str,
    ) -> Result<()> {
        let item = RetryQueueItem::first_failure(kind, record_id.clone(), error);
        sqlx::query(UPSERT_RETRY_ITEM)
            .bind(&item.id)
            .bind(item.record_kind.as_str())
            .bind(item.record_id.as_str())
            .bind(item.last_attempt_at.timestamp_millis())
            .bind(&item.last_error)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_retry_items(&self) -> Result<Vec<RetryQueueItem>> {
        let rows = sqlx::query(SELECT_RETRY_ITEMS)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_retry_row).collect()
    }

    async fn delete_retry_item(&self, id: &str) -> Result<()> {
        sqlx::query(DELETE_RETRY_ITEM)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
