use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a locally created record: a kind prefix, the creation time
/// in unix milliseconds, and a random suffix. Unique without a central
/// allocator, even for records created within the same millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate(prefix: &str) -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix: u32 = rand::random();
        Self(format!("{prefix}-{millis}-{suffix:08x}"))
    }

    pub fn new(value: String) -> Result<Self, String> {
        if value.trim().is_empty() {
            return Err("Record id cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_carry_prefix() {
        let id = RecordId::generate("vitals");
        assert!(id.as_str().starts_with("vitals-"));
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<String> = (0..1000)
            .map(|_| RecordId::generate("recording").into())
            .collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn empty_id_rejected() {
        assert!(RecordId::new("  ".to_string()).is_err());
    }
}
