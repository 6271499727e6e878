use serde::{Deserialize, Serialize};
use std::fmt;

/// The record kinds the engine persists and uploads. Doubles as the id
/// prefix and the upload route discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Recording,
    Symptom,
    Vitals,
    Report,
    Logbook,
}

impl RecordKind {
    /// Pass order: recordings and symptoms first, then the rest.
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Recording,
        RecordKind::Symptom,
        RecordKind::Vitals,
        RecordKind::Report,
        RecordKind::Logbook,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            RecordKind::Recording => "recording",
            RecordKind::Symptom => "symptom",
            RecordKind::Vitals => "vitals",
            RecordKind::Report => "report",
            RecordKind::Logbook => "logbook",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "recording" => Ok(RecordKind::Recording),
            "symptom" => Ok(RecordKind::Symptom),
            "vitals" => Ok(RecordKind::Vitals),
            "report" => Ok(RecordKind::Report),
            "logbook" => Ok(RecordKind::Logbook),
            other => Err(format!("Unknown record kind: {other}")),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
