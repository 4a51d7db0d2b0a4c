use chrono::NaiveDate;

use crate::age::age_on;
use crate::error::SummaryError;
use crate::record::{Age, Demographics, UNKNOWN};
use crate::xml::FhirDocument;

/// Gender and age from a `Patient` read response.
///
/// `today` is the reference date for the age calculation.
pub fn parse_patient(xml: &str, today: NaiveDate) -> Result<Demographics, SummaryError> {
    let document = FhirDocument::parse(xml)?;
    let patient = document.root();

    let gender = patient
        .find_value("gender")
        .unwrap_or_else(|| UNKNOWN.to_string());

    let age = match patient.find_value("birthDate") {
        Some(birth_date) => Age::Years(age_on(&birth_date, today)?),
        None => Age::Unknown,
    };

    Ok(Demographics { gender, age })
}
