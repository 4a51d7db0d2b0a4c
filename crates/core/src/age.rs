//! Age in completed years from a FHIR `birthDate`

use chrono::{Datelike, Local, NaiveDate};

use crate::error::SummaryError;

const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Age on `today` of someone born on `birth_date` (`YYYY-MM-DD`)
pub fn age_on(birth_date: &str, today: NaiveDate) -> Result<u32, SummaryError> {
    let birth = NaiveDate::parse_from_str(birth_date, BIRTH_DATE_FORMAT).map_err(|e| {
        SummaryError::InvalidDate {
            value: birth_date.to_string(),
            reason: e.to_string(),
        }
    })?;

    if birth > today {
        tracing::warn!(birth_date, %today, "Birth date is in the future, reporting age 0");
        return Ok(0);
    }

    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }

    // birth <= today keeps this non-negative
    Ok(u32::try_from(age).unwrap_or(0))
}

/// The local calendar date ages are computed against by default
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
