use super::mapper::map_consent_row;
use super::queries::{INSERT_CONSENT_GRANT, SELECT_CONSENTS_BY_OWNER, SELECT_LATEST_CONSENT};
use super::SqliteRepository;
use crate::application::ports::repositories::ConsentRepository;
use crate::domain::entities::ConsentGrant;
use crate::domain::value_objects::{ConsentType, OwnerId};
use crate::shared::error::Result;
use async_trait::async_trait;

#[async_trait]
impl ConsentRepository for SqliteRepository {
    async fn append_grant(&self, grant: &ConsentGrant) -> Result<()> {
        sqlx::query(INSERT_CONSENT_GRANT)
            .bind(grant.id.as_str())
            .bind(grant.owner_id.as_str())
            .bind(grant.consent_type.as_str())
            .bind(grant.granted)
            .bind(&grant.language)
            .bind(grant.created_at.timestamp_millis())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn latest_grant(
        &self,
        owner: &OwnerId,
        consent_type: ConsentType,
    ) -> Result<Option<ConsentGrant>> {
        let row = sqlx::query(SELECT_LATEST_CONSENT)
            .bind(owner.as_str())
            .bind(consent_type.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_consent_row).transpose()
    }

    async fn list_grants(&self, owner: &OwnerId) -> Result<Vec<ConsentGrant>> {
        let rows = sqlx::query(SELECT_CONSENTS_BY_OWNER)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_consent_row).collect()
    }
}
