use crate::bundle::Bundle;
use crate::error::SummaryError;
use crate::query::ResourceType;
use crate::record::UNKNOWN_MEDICATION;
use crate::xml::FhirDocument;

/// Display name of the first MedicationRequest in a search Bundle.
///
/// Only the first request is summarized; later entries are ignored.
pub fn parse_medication(xml: &str) -> Result<String, SummaryError> {
    let document = FhirDocument::parse(xml)?;
    let bundle = Bundle::new(&document);
    bundle.report(ResourceType::MedicationRequest);

    let display = bundle
        .resources(ResourceType::MedicationRequest)
        .next()
        .and_then(|request| request.find_value("medicationReference/display"));

    Ok(display.unwrap_or_else(|| {
        tracing::debug!("No medicationReference display on the first MedicationRequest");
        UNKNOWN_MEDICATION.to_string()
    }))
}
