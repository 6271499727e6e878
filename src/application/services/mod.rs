pub mod consent_service;
pub mod record_service;
pub mod status_publisher;
pub mod sync_service;

pub use consent_service::ConsentService;
pub use record_service::RecordService;
pub use status_publisher::{StatusPublisher, SyncStatus};
pub use sync_service::SyncService;
