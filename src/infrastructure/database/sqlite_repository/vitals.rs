use super::mapper::map_vitals_row;
use super::queries::{
    INSERT_VITALS, MARK_VITALS_SYNCED, SELECT_UNSYNCED_VITALS, SELECT_VITALS_BY_ID,
    SELECT_VITALS_BY_OWNER,
};
use super::SqliteRepository;
use crate::application::ports::repositories::VitalsRepository;
use crate::domain::entities::Vitals;
use crate::domain::value_objects::{OwnerId, RecordId};
use crate::shared::error::Result;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl VitalsRepository for SqliteRepository {
    async fn create_vitals(&self, vitals: &Vitals) -> Result<()> {
        sqlx::query(INSERT_VITALS)
            .bind(vitals.id.as_str())
            .bind(vitals.owner_id.as_str())
            .bind(vitals.signs.bp_systolic)
            .bind(vitals.signs.bp_diastolic)
            .bind(vitals.signs.temperature)
            .bind(vitals.signs.weight)
            .bind(vitals.entered_by.role_str())
            .bind(vitals.entered_by.worker_uid())
            .bind(vitals.symptom_id.as_ref().map(RecordId::as_str))
            .bind(vitals.synced)
            .bind(vitals.created_at.timestamp_millis())
            .bind(vitals.synced_at.map(|t| t.timestamp_millis()))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_vitals(&self, id: &RecordId) -> Result<Option<Vitals>> {
        let row = sqlx::query(SELECT_VITALS_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_vitals_row).transpose()
    }

    async fn list_unsynced_vitals(&self) -> Result<Vec<Vitals>> {
        let rows = sqlx::query(SELECT_UNSYNCED_VITALS)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_vitals_row).collect()
    }

    async fn list_vitals_by_owner(&self, owner: &OwnerId) -> Result<Vec<Vitals>> {
        let rows = sqlx::query(SELECT_VITALS_BY_OWNER)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_vitals_row).collect()
    }

    async fn mark_vitals_synced(&self, id: &RecordId) -> Result<()> {
        sqlx::query(MARK_VITALS_SYNCED)
            .bind(id.as_str())
            .bind(Utc::now().timestamp_millis())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
