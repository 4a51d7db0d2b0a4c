//! Assemble a [`PatientRecord`] from the five resource queries

use chrono::NaiveDate;

use crate::age;
use crate::error::SummaryError;
use crate::outcome::OperationOutcome;
use crate::parse;
use crate::query::{ResourceQuery, ResourceType};
use crate::record::PatientRecord;
use crate::transport::Transport;

const ENCOUNTER_DIAGNOSIS: &str = "encounter-diagnosis";
const SOCIAL_HISTORY: &str = "social-history";

/// Fetches and merges one patient's summary, one request at a time.
///
/// The first failed request or parse aborts the aggregation; no partial
/// record is ever returned.
pub struct PatientAggregator<T> {
    transport: T,
    base_url: String,
    reference_date: Option<NaiveDate>,
}

impl<T: Transport> PatientAggregator<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            reference_date: None,
        }
    }

    /// Compute ages against a fixed date instead of today
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the summary for `patient_id` using `bearer_token`.
    ///
    /// Fails with [`SummaryError::AuthenticationRequired`] before any request
    /// when the token is missing or blank.
    pub async fn aggregate(
        &self,
        bearer_token: Option<&str>,
        patient_id: &str,
    ) -> Result<PatientRecord, SummaryError> {
        let Some(token) = bearer_token.filter(|t| !t.trim().is_empty()) else {
            tracing::error!(patient_id, "No bearer token established");
            return Err(SummaryError::AuthenticationRequired);
        };

        let result = self.collect(token, patient_id).await;
        match &result {
            Ok(_) => tracing::info!(patient_id, "Patient summary assembled"),
            Err(e) => tracing::error!(patient_id, error = %e, "Patient aggregation failed"),
        }
        result
    }

    async fn collect(&self, token: &str, patient_id: &str) -> Result<PatientRecord, SummaryError> {
        let today = self.reference_date.unwrap_or_else(age::today);

        let body = self
            .fetch(token, &ResourceQuery::patient_read(patient_id))
            .await?;
        let demographics = parse::parse_patient(&body, today)?;

        let body = self
            .fetch(
                token,
                &ResourceQuery::search(ResourceType::MedicationRequest, patient_id),
            )
            .await?;
        let medications = parse::parse_medication(&body)?;

        let body = self
            .fetch(
                token,
                &ResourceQuery::search(ResourceType::AllergyIntolerance, patient_id),
            )
            .await?;
        let allergies = parse::parse_allergies(&body)?;

        let body = self
            .fetch(
                token,
                &ResourceQuery::search(ResourceType::Condition, patient_id)
                    .with_category(ENCOUNTER_DIAGNOSIS),
            )
            .await?;
        let conditions = parse::parse_conditions(&body)?;

        let body = self
            .fetch(
                token,
                &ResourceQuery::search(ResourceType::Observation, patient_id)
                    .with_category(SOCIAL_HISTORY),
            )
            .await?;
        let social_history = parse::parse_social_history(&body)?;

        Ok(PatientRecord {
            gender: demographics.gender,
            age: demographics.age,
            medications,
            allergies,
            conditions,
            social_history,
        })
    }

    /// Issue one query and return its body once it passes status, body and
    /// content type checks
    async fn fetch(&self, token: &str, query: &ResourceQuery) -> Result<String, SummaryError> {
        let resource = query.resource_type;
        let url = query.url(&self.base_url);
        tracing::debug!(%resource, %url, "Fetching FHIR resource");

        let response = self
            .transport
            .get(&url, token)
            .await
            .map_err(|source| SummaryError::Transport { resource, source })?;

        if response.status != 200 {
            if let Some(outcome) = OperationOutcome::from_body(&response.body) {
                outcome.log(resource);
            }
            return Err(SummaryError::UnexpectedStatus {
                resource,
                status: response.status,
                body: response.body,
            });
        }

        if response.body.trim().is_empty() {
            return Err(SummaryError::EmptyResponse { resource });
        }

        // The Patient read must declare XML; searches only fail on a declared non-XML type
        let declared = response.content_type.is_some();
        let required = resource == ResourceType::Patient;
        if !response.is_xml() && (declared || required) {
            return Err(SummaryError::UnsupportedFormat {
                resource,
                content_type: response.content_type,
            });
        }

        tracing::debug!(%resource, bytes = response.body.len(), "Received FHIR response");
        Ok(response.body)
    }
}
