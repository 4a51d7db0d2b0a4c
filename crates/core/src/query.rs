//! Outbound request descriptions

use std::fmt;

/// The five FHIR resource types a patient summary is assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Patient,
    MedicationRequest,
    AllergyIntolerance,
    Condition,
    Observation,
}

impl ResourceType {
    /// Resource name as it appears in URLs and XML element names
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Patient => "Patient",
            ResourceType::MedicationRequest => "MedicationRequest",
            ResourceType::AllergyIntolerance => "AllergyIntolerance",
            ResourceType::Condition => "Condition",
            ResourceType::Observation => "Observation",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound GET against the FHIR endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceQuery {
    pub resource_type: ResourceType,
    pub patient_id: String,
    pub extra_params: Vec<(String, String)>,
}

impl ResourceQuery {
    /// `GET {base}/Patient/{id}`
    pub fn patient_read(patient_id: &str) -> Self {
        Self {
            resource_type: ResourceType::Patient,
            patient_id: patient_id.to_string(),
            extra_params: Vec::new(),
        }
    }

    /// `GET {base}/{type}?patient={id}`
    pub fn search(resource_type: ResourceType, patient_id: &str) -> Self {
        Self {
            resource_type,
            patient_id: patient_id.to_string(),
            extra_params: Vec::new(),
        }
    }

    /// Append a `category=...` filter
    pub fn with_category(mut self, category: &str) -> Self {
        self.extra_params
            .push(("category".to_string(), category.to_string()));
        self
    }

    /// Build the full request URL against `base_url`
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');

        let patient_id = urlencoding::encode(&self.patient_id);

        if self.resource_type == ResourceType::Patient {
            return format!("{}/Patient/{}", base, patient_id);
        }

        let mut url = format!("{}/{}?patient={}", base, self.resource_type, patient_id);
        for (key, value) in &self.extra_params {
            url.push('&');
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}
