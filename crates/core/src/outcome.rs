use tracing::Level;

use crate::query::ResourceType;
use crate::xml::{Element, FhirDocument};

/// Severity of the issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Fatal,
    Error,
    Warning,
    Information,
}

impl IssueSeverity {
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "fatal" => Some(IssueSeverity::Fatal),
            "error" => Some(IssueSeverity::Error),
            "warning" => Some(IssueSeverity::Warning),
            "information" => Some(IssueSeverity::Information),
            _ => None,
        }
    }

    /// Level an issue of this severity is logged at. Unknown severities
    /// are treated as warnings.
    pub fn log_level(severity: Option<Self>) -> Level {
        match severity {
            Some(IssueSeverity::Fatal) | Some(IssueSeverity::Error) => Level::ERROR,
            Some(IssueSeverity::Information) => Level::DEBUG,
            Some(IssueSeverity::Warning) | None => Level::WARN,
        }
    }
}

/// A single issue within an OperationOutcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcomeIssue {
    pub severity: Option<IssueSeverity>,
    pub code: Option<String>,
    pub details: Option<String>,
    pub diagnostics: Option<String>,
}

impl OperationOutcomeIssue {
    /// Human readable text: `details/text`, else `diagnostics`
    pub fn message(&self) -> Option<&str> {
        self.details.as_deref().or(self.diagnostics.as_deref())
    }
}

/// FHIR OperationOutcome resource, as returned in error bodies and
/// embedded in search Bundles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    pub issues: Vec<OperationOutcomeIssue>,
}

impl OperationOutcome {
    pub fn from_element(element: &Element) -> Self {
        let issues = element
            .children_named("issue")
            .map(|issue| OperationOutcomeIssue {
                severity: issue
                    .child("severity")
                    .and_then(Element::primitive_value)
                    .and_then(IssueSeverity::parse),
                code: issue
                    .child("code")
                    .and_then(Element::primitive_value)
                    .map(str::to_string),
                details: issue.find_value("details/text"),
                diagnostics: issue
                    .child("diagnostics")
                    .and_then(Element::primitive_value)
                    .map(str::to_string),
            })
            .collect();

        Self { issues }
    }

    /// Try to read an OperationOutcome out of a raw response body
    pub fn from_body(body: &str) -> Option<Self> {
        let document = FhirDocument::parse(body).ok()?;
        document
            .root()
            .is("OperationOutcome")
            .then(|| Self::from_element(document.root()))
    }

    pub fn log(&self, resource_type: ResourceType) {
        for issue in &self.issues {
            let message = issue.message().unwrap_or("");
            let code = issue.code.as_deref().unwrap_or("unknown");
            let level = IssueSeverity::log_level(issue.severity);
            if level == Level::ERROR {
                tracing::error!(resource = %resource_type, code, message, "Server reported error");
            } else if level == Level::DEBUG {
                tracing::debug!(resource = %resource_type, code, message, "Server informational issue");
            } else {
                tracing::warn!(resource = %resource_type, code, message, "Server reported issue");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_error_body() {
        let body = r#"<OperationOutcome xmlns="http://hl7.org/fhir">
  <issue>
    <severity value="fatal"/>
    <code value="not-found"/>
    <diagnostics value="Patient/xyz not found"/>
  </issue>
</OperationOutcome>"#;

        let outcome = OperationOutcome::from_body(body).unwrap();
        assert_eq!(outcome.issues.len(), 1);
        let issue = &outcome.issues[0];
        assert_eq!(issue.severity, Some(IssueSeverity::Fatal));
        assert_eq!(issue.code.as_deref(), Some("not-found"));
        assert_eq!(issue.message(), Some("Patient/xyz not found"));
    }

    #[test]
    fn severity_maps_to_log_level() {
        assert_eq!(IssueSeverity::log_level(Some(IssueSeverity::Fatal)), Level::ERROR);
        assert_eq!(IssueSeverity::log_level(Some(IssueSeverity::Error)), Level::ERROR);
        assert_eq!(IssueSeverity::log_level(Some(IssueSeverity::Warning)), Level::WARN);
        assert_eq!(IssueSeverity::log_level(None), Level::WARN);
        assert_eq!(
            IssueSeverity::log_level(Some(IssueSeverity::Information)),
            Level::DEBUG
        );
    }

    #[test]
    fn plain_text_body_is_not_an_outcome() {
        assert!(OperationOutcome::from_body("Not Found").is_none());
        assert!(
            OperationOutcome::from_body(r#"<Patient xmlns="http://hl7.org/fhir"/>"#).is_none()
        );
    }
}
