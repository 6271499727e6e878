use super::mapper::map_report_row;
use super::queries::{
    APPROVE_REPORT_FOR_SHARING, INSERT_REPORT, MARK_REPORT_SYNCED, SELECT_REPORTS_BY_OWNER,
    SELECT_REPORT_BY_ID, SELECT_UNSYNCED_REPORTS,
};
use super::SqliteRepository;
use crate::application::ports::repositories::ReportRepository;
use crate::domain::entities::Report;
use crate::domain::value_objects::{OwnerId, RecordId};
use crate::shared::error::Result;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl ReportRepository for SqliteRepository {
    async fn create_report(&self, report: &Report) -> Result<()> {
        sqlx::query(INSERT_REPORT)
            .bind(report.id.as_str())
            .bind(report.owner_id.as_str())
            .bind(&report.file_name)
            .bind(&report.file_type)
            .bind(report.file_size as i64)
            .bind(report.uploaded_by.role_str())
            .bind(report.uploaded_by.worker_uid())
            .bind(report.symptom_id.as_ref().map(RecordId::as_str))
            .bind(report.approved_for_sharing)
            .bind(report.synced)
            .bind(report.created_at.timestamp_millis())
            .bind(report.synced_at.map(|t| t.timestamp_millis()))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_report(&self, id: &RecordId) -> Result<Option<Report>> {
        let row = sqlx::query(SELECT_REPORT_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_report_row).transpose()
    }

    async fn list_unsynced_reports(&self) -> Result<Vec<Report>> {
        let rows = sqlx::query(SELECT_UNSYNCED_REPORTS)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_report_row).collect()
    }

    async fn list_reports_by_owner(&self, owner: &OwnerId) -> Result<Vec<Report>> {
        let rows = sqlx::query(SELECT_REPORTS_BY_OWNER)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_report_row).collect()
    }

    async fn mark_report_synced(&self, id: &RecordId) -> Result<()> {
        sqlx::query(MARK_REPORT_SYNCED)
            .bind(id.as_str())
            .bind(Utc::now().timestamp_millis())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn approve_report_for_sharing(&self, id: &RecordId) -> Result<()> {
        sqlx::query(APPROVE_REPORT_FOR_SHARING)
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
