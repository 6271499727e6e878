pub mod application;
pub mod domain;
pub mod engine;
pub mod infrastructure;
pub mod shared;

pub use application::ports::connectivity::{ConnectivityEvent, ConnectivityMonitor};
pub use application::ports::transport::{RecordTransport, UploadEnvelope};
pub use application::services::{
    ConsentService, RecordService, StatusPublisher, SyncService, SyncStatus,
};
pub use domain::entities::{
    ConsentGrant, LogbookEntry, Recording, Report, RetryQueueItem, StructuredSummary, Symptom,
    SyncReport, VitalSigns, Vitals,
};
pub use domain::value_objects::{ConsentType, EnteredBy, OwnerId, RecordId, RecordKind};
pub use engine::SyncEngine;
pub use infrastructure::connectivity::ManualConnectivity;
pub use shared::config::AppConfig;
pub use shared::error::{Result, SyncError};

/// Install the process-wide tracing subscriber. Call once from the embedding
/// application; tests and library consumers that configure their own
/// subscriber skip this.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carevista_sync=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
