use crate::bundle::Bundle;
use crate::error::SummaryError;
use crate::query::ResourceType;
use crate::record::NO_SOCIAL_HISTORY;
use crate::xml::FhirDocument;

use super::join_or;

/// Comma-separated social history from a social-history Observation Bundle.
///
/// Each Observation contributes `code/text` then `valueCodeableConcept/text`,
/// whichever are present.
pub fn parse_social_history(xml: &str) -> Result<String, SummaryError> {
    let document = FhirDocument::parse(xml)?;
    let bundle = Bundle::new(&document);
    bundle.report(ResourceType::Observation);

    let history = bundle
        .resources(ResourceType::Observation)
        .flat_map(|observation| {
            [
                observation.find_value("code/text"),
                observation.find_value("valueCodeableConcept/text"),
            ]
        })
        .flatten()
        .collect();

    Ok(join_or(history, NO_SOCIAL_HISTORY))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(entries: &[&str]) -> String {
        let entries: String = entries
            .iter()
            .map(|e| format!("<entry><resource><Observation>{e}</Observation></resource></entry>"))
            .collect();
        format!(r#"<Bundle xmlns="http://hl7.org/fhir"><type value="searchset"/>{entries}</Bundle>"#)
    }

    #[test]
    fn code_then_value_in_order() {
        let xml = bundle(&[r#"
            <status value="final"/>
            <code><text value="Smoker"/></code>
            <valueCodeableConcept><text value="Former smoker"/></valueCodeableConcept>"#]);
        assert_eq!(parse_social_history(&xml).unwrap(), "Smoker, Former smoker");
    }

    #[test]
    fn entries_contribute_zero_one_or_two() {
        let xml = bundle(&[
            r#"<code><text value="Alcohol use"/></code>"#,
            r#"<valueQuantity><value value="3"/></valueQuantity>"#,
            r#"<code><text value="Sexual activity"/></code><valueCodeableConcept><text value="Not currently"/></valueCodeableConcept>"#,
            r#"<code><text value=""/></code><valueCodeableConcept><text value="Never"/></valueCodeableConcept>"#,
        ]);
        assert_eq!(
            parse_social_history(&xml).unwrap(),
            "Alcohol use, Sexual activity, Not currently, Never"
        );
    }

    #[test]
    fn empty_bundle_is_not_assessed() {
        assert_eq!(
            parse_social_history(&bundle(&[])).unwrap(),
            "No social history assessed"
        );
    }
}
