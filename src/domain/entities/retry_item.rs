use crate::domain::value_objects::{RecordId, RecordKind};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a queue item may be retried right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Due,
    /// Attempts reached the ceiling; kept for inspection, never retried.
    Exhausted,
    /// Last attempt was too recent.
    InBackoff,
}

/// A record of a failed upload, decoupled from the record itself: only the
/// kind and id are kept, never a copy of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryQueueItem {
    pub id: String,
    pub record_kind: RecordKind,
    pub record_id: RecordId,
    pub attempts: u32,
    pub last_attempt_at: DateTime<Utc>,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RetryQueueItem {
    pub fn first_failure(record_kind: RecordKind, record_id: RecordId, error: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            record_kind,
            record_id,
            attempts: 1,
            last_attempt_at: now,
            last_error: Some(error.to_string()),
            created_at: now,
        }
    }

    pub fn decide(&self, now: DateTime<Utc>, max_attempts: u32, min_backoff: Duration) -> RetryDecision {
        if self.attempts >= max_attempts {
            return RetryDecision::Exhausted;
        }
        if now - self.last_attempt_at < min_backoff {
            return RetryDecision::InBackoff;
        }
        RetryDecision::Due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::RecordId;

    fn item(attempts: u32, seconds_ago: i64) -> RetryQueueItem {
        let mut item = RetryQueueItem::first_failure(
            RecordKind::Recording,
            RecordId::new("recording-1-abc".into()).unwrap(),
            "connection reset",
        );
        item.attempts = attempts;
        item.last_attempt_at = Utc::now() - Duration::seconds(seconds_ago);
        item
    }

    #[test]
    fn due_after_backoff_window() {
        let decision = item(1, 60).decide(Utc::now(), 5, Duration::seconds(30));
        assert_eq!(decision, RetryDecision::Due);
    }

    #[test]
    fn skipped_inside_backoff_window() {
        let decision = item(1, 5).decide(Utc::now(), 5, Duration::seconds(30));
        assert_eq!(decision, RetryDecision::InBackoff);
    }

    #[test]
    fn exhausted_at_ceiling() {
        let decision = item(5, 3600).decide(Utc::now(), 5, Duration::seconds(30));
        assert_eq!(decision, RetryDecision::Exhausted);
    }
}
