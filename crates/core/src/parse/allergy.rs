use crate::bundle::Bundle;
use crate::error::SummaryError;
use crate::query::ResourceType;
use crate::record::NO_KNOWN_ALLERGIES;
use crate::xml::FhirDocument;

use super::join_or;

/// Comma-separated allergy list from an AllergyIntolerance search Bundle.
///
/// Each entry contributes at most one name: `code/text`, falling back to
/// `verificationStatus/coding/display`.
pub fn parse_allergies(xml: &str) -> Result<String, SummaryError> {
    let document = FhirDocument::parse(xml)?;
    let bundle = Bundle::new(&document);
    bundle.report(ResourceType::AllergyIntolerance);

    let allergies = bundle
        .resources(ResourceType::AllergyIntolerance)
        .filter_map(|allergy| {
            allergy
                .find_value("code/text")
                .or_else(|| allergy.find_value("verificationStatus/coding/display"))
        })
        .collect();

    Ok(join_or(allergies, NO_KNOWN_ALLERGIES))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(entries: &[&str]) -> String {
        let entries: String = entries
            .iter()
            .map(|e| format!("<entry><resource><AllergyIntolerance>{e}</AllergyIntolerance></resource></entry>"))
            .collect();
        format!(r#"<Bundle xmlns="http://hl7.org/fhir"><type value="searchset"/>{entries}</Bundle>"#)
    }

    #[test]
    fn zero_entries_is_no_known_allergies() {
        assert_eq!(parse_allergies(&bundle(&[])).unwrap(), "No known allergies");
    }

    #[test]
    fn code_text_wins_over_verification_status() {
        let xml = bundle(&[r#"
            <verificationStatus><coding><display value="Confirmed"/></coding></verificationStatus>
            <code><text value="Penicillin G"/></code>"#]);
        assert_eq!(parse_allergies(&xml).unwrap(), "Penicillin G");
    }

    #[test]
    fn falls_back_to_verification_status() {
        let xml = bundle(&[
            r#"<code><text value="Peanut"/></code>"#,
            r#"<verificationStatus><coding><display value="Unconfirmed"/></coding></verificationStatus>"#,
            r#"<clinicalStatus><coding><code value="active"/></coding></clinicalStatus>"#,
        ]);
        assert_eq!(parse_allergies(&xml).unwrap(), "Peanut, Unconfirmed");
    }

    #[test]
    fn empty_code_text_falls_back() {
        let xml = bundle(&[r#"
            <verificationStatus><coding><display value="Refuted"/></coding></verificationStatus>
            <code><text value=""/></code>"#]);
        assert_eq!(parse_allergies(&xml).unwrap(), "Refuted");
    }

    #[test]
    fn malformed_bundle_is_an_error() {
        assert!(matches!(
            parse_allergies("<Bundle xmlns=\"http://hl7.org/fhir\"><entry></Bundle>"),
            Err(SummaryError::Parse(_))
        ));
    }
}
