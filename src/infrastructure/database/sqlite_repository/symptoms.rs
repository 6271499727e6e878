use super::mapper::map_symptom_row;
use super::queries::{
    INSERT_SYMPTOM, MARK_SYMPTOM_SYNCED, SELECT_SYMPTOMS_BY_OWNER, SELECT_SYMPTOM_BY_ID,
    SELECT_UNSYNCED_SYMPTOMS,
};
use super::SqliteRepository;
use crate::application::ports::repositories::SymptomRepository;
use crate::domain::entities::Symptom;
use crate::domain::value_objects::{OwnerId, RecordId};
use crate::shared::error::Result;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl SymptomRepository for SqliteRepository {
    async fn create_symptom(&self, symptom: &Symptom) -> Result<()> {
        sqlx::query(INSERT_SYMPTOM)
            .bind(symptom.id.as_str())
            .bind(symptom.owner_id.as_str())
            .bind(&symptom.text)
            .bind(&symptom.language)
            .bind(symptom.consent_id.as_str())
            .bind(symptom.synced)
            .bind(symptom.created_at.timestamp_millis())
            .bind(symptom.synced_at.map(|t| t.timestamp_millis()))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_symptom(&self, id: &RecordId) -> Result<Option<Symptom>> {
        let row = sqlx::query(SELECT_SYMPTOM_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_symptom_row).transpose()
    }

    async fn list_unsynced_symptoms(&self) -> Result<Vec<Symptom>> {
        let rows = sqlx::query(SELECT_UNSYNCED_SYMPTOMS)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_symptom_row).collect()
    }

    async fn list_symptoms_by_owner(&self, owner: &OwnerId) -> Result<Vec<Symptom>> {
        let rows = sqlx::query(SELECT_SYMPTOMS_BY_OWNER)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_symptom_row).collect()
    }

    async fn mark_symptom_synced(&self, id: &RecordId) -> Result<()> {
        sqlx::query(MARK_SYMPTOM_SYNCED)
            .bind(id.as_str())
            .bind(Utc::now().timestamp_millis())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
