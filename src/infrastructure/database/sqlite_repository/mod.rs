use super::connection::{Database, DbPool};
use crate::application::ports::repositories::Repository;
use crate::shared::error::Result;
use async_trait::async_trait;
use sqlx::Row;

mod consents;
mod logbook;
mod mapper;
mod queries;
mod recordings;
mod reports;
mod retry_queue;
mod symptoms;
mod vitals;

pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn initialize(&self) -> Result<()> {
        Database::run_migrations(&self.pool).await
    }

    async fn health_check(&self) -> Result<bool> {
        let result = sqlx::query("SELECT 1").fetch_one(&self.pool).await;
        Ok(result.is_ok())
    }

    async fn count_unsynced(&self) -> Result<u64> {
        let row = sqlx::query(queries::COUNT_UNSYNCED)
            .fetch_one(&self.pool)
            .await?;
        let pending: i64 = row.try_get("pending")?;
        Ok(pending.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::repositories::{RetryQueueRepository, SymptomRepository};
    use crate::domain::entities::Symptom;
    use crate::domain::value_objects::{OwnerId, RecordId, RecordKind};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup() -> SqliteRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        Database::run_migrations(&pool).await.unwrap();
        SqliteRepository::new(pool)
    }

    #[tokio::test]
    async fn repeated_failures_bump_one_queue_item() {
        let repo = setup().await;
        let id = RecordId::new("symptom-1-f00d".into()).unwrap();

        repo.record_upload_failure(RecordKind::Symptom, &id, "timeout")
            .await
            .unwrap();
        repo.record_upload_failure(RecordKind::Symptom, &id, "connection reset")
            .await
            .unwrap();

        let items = repo.list_retry_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].attempts, 2);
        assert_eq!(items[0].last_error.as_deref(), Some("connection reset"));
    }

    #[tokio::test]
    async fn deleting_a_queue_item_leaves_the_record_alone() {
        let repo = setup().await;
        let symptom = Symptom::new(
            OwnerId::new("p1").unwrap(),
            "itchy rash".into(),
            "en".into(),
            RecordId::new("consent-1-cafe".into()).unwrap(),
        );
        repo.create_symptom(&symptom).await.unwrap();
        repo.record_upload_failure(RecordKind::Symptom, &symptom.id, "503")
            .await
            .unwrap();

        let item_id = repo.list_retry_items().await.unwrap()[0].id.clone();
        repo.delete_retry_item(&item_id).await.unwrap();

        assert!(repo.list_retry_items().await.unwrap().is_empty());
        assert!(repo.get_symptom(&symptom.id).await.unwrap().is_some());
        assert_eq!(repo.count_unsynced().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn health_check_reports_ok() {
        let repo = setup().await;
        assert!(repo.health_check().await.unwrap());
    }
}
