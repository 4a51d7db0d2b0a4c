//! The flat patient summary handed back to callers

use serde::{Serialize, Serializer};
use std::fmt;

pub const UNKNOWN: &str = "Unknown";
pub const UNKNOWN_MEDICATION: &str = "Unknown medication";
pub const NO_KNOWN_ALLERGIES: &str = "No known allergies";
pub const NO_KNOWN_CONDITIONS: &str = "No known conditions";
pub const NO_SOCIAL_HISTORY: &str = "No social history assessed";

/// Age in whole years, or unknown when the Patient has no `birthDate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Age {
    Years(u32),
    Unknown,
}

impl Serialize for Age {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Age::Years(years) => serializer.serialize_u32(*years),
            Age::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Age::Years(years) => write!(f, "{}", years),
            Age::Unknown => f.write_str(UNKNOWN),
        }
    }
}

/// Gender and age from the Patient resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demographics {
    pub gender: String,
    pub age: Age,
}

/// Clinical summary of one patient. Every field is always populated;
/// missing data is spelled out with the sentinel strings above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientRecord {
    pub gender: String,
    pub age: Age,
    pub medications: String,
    pub allergies: String,
    pub conditions: String,
    pub social_history: String,
}
