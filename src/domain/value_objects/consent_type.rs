use serde::{Deserialize, Serialize};
use std::fmt;

/// One kind of data processing a patient can permit or refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentType {
    Recording,
    Transcription,
    DoctorSharing,
}

impl ConsentType {
    pub fn as_str(&self) -> &str {
        match self {
            ConsentType::Recording => "recording",
            ConsentType::Transcription => "transcription",
            ConsentType::DoctorSharing => "doctor_sharing",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "recording" => Ok(ConsentType::Recording),
            "transcription" => Ok(ConsentType::Transcription),
            "doctor_sharing" => Ok(ConsentType::DoctorSharing),
            other => Err(format!("Unknown consent type: {other}")),
        }
    }
}

impl fmt::Display for ConsentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
