use crate::domain::value_objects::ConsentType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Consent required: no granted {0} consent for this patient")]
    ConsentRequired(ConsentType),

    #[error("Storage failure: {0}")]
    Storage(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("No connectivity: sync cannot start while offline")]
    Offline,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for SyncError {
    fn from(err: sqlx::Error) -> Self {
        SyncError::Storage(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for SyncError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        SyncError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for SyncError {
    fn from(err: anyhow::Error) -> Self {
        SyncError::Upload(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
