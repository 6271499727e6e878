mod consent_grant;
mod logbook_entry;
mod recording;
mod report;
mod retry_item;
mod symptom;
mod sync_report;
mod vitals;

pub use consent_grant::ConsentGrant;
pub use logbook_entry::{LogbookEntry, StructuredSummary};
pub use recording::Recording;
pub use report::Report;
pub use retry_item::{RetryDecision, RetryQueueItem};
pub use symptom::Symptom;
pub use sync_report::SyncReport;
pub use vitals::{VitalSigns, Vitals};
