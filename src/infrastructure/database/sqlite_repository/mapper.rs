use crate::domain::entities::{
    ConsentGrant, LogbookEntry, Recording, Report, RetryQueueItem, StructuredSummary, Symptom,
    Vitals, VitalSigns,
};
use crate::domain::value_objects::{ConsentType, EnteredBy, OwnerId, RecordId, RecordKind};
use crate::shared::error::SyncError;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

type MapResult<T> = Result<T, SyncError>;

fn record_id(row: &SqliteRow, column: &str) -> MapResult<RecordId> {
    RecordId::new(row.try_get(column)?).map_err(SyncError::Storage)
}

fn owner_id(row: &SqliteRow) -> MapResult<OwnerId> {
    OwnerId::new(row.try_get::<String, _>("owner_id")?).map_err(SyncError::Storage)
}

fn timestamp(row: &SqliteRow, column: &str) -> MapResult<DateTime<Utc>> {
    let millis: i64 = row.try_get(column)?;
    Ok(DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now))
}

fn optional_timestamp(row: &SqliteRow, column: &str) -> MapResult<Option<DateTime<Utc>>> {
    let millis: Option<i64> = row.try_get(column)?;
    Ok(millis.and_then(DateTime::from_timestamp_millis))
}

fn optional_record_id(row: &SqliteRow, column: &str) -> MapResult<Option<RecordId>> {
    let value: Option<String> = row.try_get(column)?;
    value
        .map(|v| RecordId::new(v).map_err(SyncError::Storage))
        .transpose()
}

fn entered_by(row: &SqliteRow, role_column: &str, uid_column: &str) -> MapResult<EnteredBy> {
    let role: String = row.try_get(role_column)?;
    let uid: Option<String> = row.try_get(uid_column)?;
    EnteredBy::from_columns(&role, uid).map_err(SyncError::Storage)
}

pub(super) fn map_consent_row(row: &SqliteRow) -> MapResult<ConsentGrant> {
    let consent_type: String = row.try_get("consent_type")?;
    Ok(ConsentGrant {
        id: record_id(row, "id")?,
        owner_id: owner_id(row)?,
        consent_type: ConsentType::parse(&consent_type).map_err(SyncError::Storage)?,
        granted: row.try_get("granted")?,
        language: row.try_get("language")?,
        created_at: timestamp(row, "created_at")?,
    })
}

pub(super) fn map_recording_row(row: &SqliteRow) -> MapResult<Recording> {
    Ok(Recording {
        id: record_id(row, "id")?,
        owner_id: owner_id(row)?,
        audio: row.try_get("audio")?,
        language: row.try_get("language")?,
        consent_id: record_id(row, "consent_id")?,
        synced: row.try_get("is_synced")?,
        created_at: timestamp(row, "created_at")?,
        synced_at: optional_timestamp(row, "synced_at")?,
    })
}

pub(super) fn map_symptom_row(row: &SqliteRow) -> MapResult<Symptom> {
    Ok(Symptom {
        id: record_id(row, "id")?,
        owner_id: owner_id(row)?,
        text: row.try_get("text")?,
        language: row.try_get("language")?,
        consent_id: record_id(row, "consent_id")?,
        synced: row.try_get("is_synced")?,
        created_at: timestamp(row, "created_at")?,
        synced_at: optional_timestamp(row, "synced_at")?,
    })
}

pub(super) fn map_vitals_row(row: &SqliteRow) -> MapResult<Vitals> {
    Ok(Vitals {
        id: record_id(row, "id")?,
        owner_id: owner_id(row)?,
        signs: VitalSigns {
            bp_systolic: row.try_get("bp_systolic")?,
            bp_diastolic: row.try_get("bp_diastolic")?,
            temperature: row.try_get("temperature")?,
            weight: row.try_get("weight")?,
        },
        entered_by: entered_by(row, "entered_by", "entered_by_uid")?,
        symptom_id: optional_record_id(row, "symptom_id")?,
        synced: row.try_get("is_synced")?,
        created_at: timestamp(row, "created_at")?,
        synced_at: optional_timestamp(row, "synced_at")?,
    })
}

pub(super) fn map_report_row(row: &SqliteRow) -> MapResult<Report> {
    Ok(Report {
        id: record_id(row, "id")?,
        owner_id: owner_id(row)?,
        file_name: row.try_get("file_name")?,
        file_type: row.try_get("file_type")?,
        file_size: row.try_get::<i64, _>("file_size")? as u64,
        uploaded_by: entered_by(row, "uploaded_by", "uploaded_by_uid")?,
        symptom_id: optional_record_id(row, "symptom_id")?,
        approved_for_sharing: row.try_get("approved_for_sharing")?,
        synced: row.try_get("is_synced")?,
        created_at: timestamp(row, "created_at")?,
        synced_at: optional_timestamp(row, "synced_at")?,
    })
}

pub(super) fn map_logbook_row(row: &SqliteRow) -> MapResult<LogbookEntry> {
    let summary_json: String = row.try_get("summary")?;
    let summary: StructuredSummary = serde_json::from_str(&summary_json)?;
    Ok(LogbookEntry {
        id: record_id(row, "id")?,
        owner_id: owner_id(row)?,
        summary,
        language: row.try_get("language")?,
        consent_id: record_id(row, "consent_id")?,
        shared_with_doctor: row.try_get("shared_with_doctor")?,
        synced: row.try_get("is_synced")?,
        created_at: timestamp(row, "created_at")?,
        synced_at: optional_timestamp(row, "synced_at")?,
    })
}

pub(super) fn map_retry_row(row: &SqliteRow) -> MapResult<RetryQueueItem> {
    let kind: String = row.try_get("record_kind")?;
    Ok(RetryQueueItem {
        id: row.try_get("id")?,
        record_kind: RecordKind::parse(&kind).map_err(SyncError::Storage)?,
        record_id: record_id(row, "record_id")?,
        attempts: row.try_get::<i64, _>("attempts")? as u32,
        last_attempt_at: timestamp(row, "last_attempt_at")?,
        last_error: row.try_get("last_error")?,
        created_at: timestamp(row, "created_at")?,
    })
}
