//! Per-resource response parsers
//!
//! Each parser takes the raw XML body of one response and reduces it to
//! the field(s) it contributes to a [`PatientRecord`](crate::PatientRecord).

mod allergy;
mod condition;
mod medication;
mod patient;
mod social_history;

pub use allergy::parse_allergies;
pub use condition::parse_conditions;
pub use medication::parse_medication;
pub use patient::parse_patient;
pub use social_history::parse_social_history;

/// Join collected values with `", "`, or fall back to the sentinel
fn join_or(values: Vec<String>, empty: &str) -> String {
    if values.is_empty() {
        empty.to_string()
    } else {
        values.join(", ")
    }
}
