use crate::bundle::Bundle;
use crate::error::SummaryError;
use crate::query::ResourceType;
use crate::record::NO_KNOWN_CONDITIONS;
use crate::xml::FhirDocument;

use super::join_or;

/// Comma-separated encounter diagnoses from a Condition search Bundle
pub fn parse_conditions(xml: &str) -> Result<String, SummaryError> {
    let document = FhirDocument::parse(xml)?;
    let bundle = Bundle::new(&document);
    bundle.report(ResourceType::Condition);

    let conditions = bundle
        .resources(ResourceType::Condition)
        .filter_map(|condition| condition.find_value("code/coding/display"))
        .collect();

    Ok(join_or(conditions, NO_KNOWN_CONDITIONS))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(entries: &[&str]) -> String {
        let entries: String = entries
            .iter()
            .map(|e| format!("<entry><resource><Condition>{e}</Condition></resource></entry>"))
            .collect();
        format!(r#"<Bundle xmlns="http://hl7.org/fhir"><type value="searchset"/>{entries}</Bundle>"#)
    }

    fn coded(display: &str) -> String {
        format!(
            r#"<category><coding><display value="Encounter Diagnosis"/></coding></category>
               <code><coding><system value="http://snomed.info/sct"/><display value="{display}"/></coding></code>"#
        )
    }

    #[test]
    fn preserves_order_with_comma_space() {
        let xml = bundle(&[coded("Asthma").as_str(), coded("Hypertension").as_str()]);
        assert_eq!(parse_conditions(&xml).unwrap(), "Asthma, Hypertension");
    }

    #[test]
    fn skips_entries_without_display() {
        let xml = bundle(&[
            r#"<code><text value="Free text only"/></code>"#,
            coded("").as_str(),
            coded("Type 2 diabetes mellitus").as_str(),
        ]);
        assert_eq!(parse_conditions(&xml).unwrap(), "Type 2 diabetes mellitus");
    }

    #[test]
    fn uses_later_coding_when_first_has_no_display() {
        let xml = bundle(&[r#"<code>
                <coding><system value="http://hl7.org/fhir/sid/icd-10-cm"/><display value=""/></coding>
                <coding><system value="http://snomed.info/sct"/><display value="Asthma"/></coding>
            </code>"#]);
        assert_eq!(parse_conditions(&xml).unwrap(), "Asthma");
    }

    #[test]
    fn empty_bundle_is_no_known_conditions() {
        assert_eq!(parse_conditions(&bundle(&[])).unwrap(), "No known conditions");
    }
}
