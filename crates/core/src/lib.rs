//! fhir-summary-core: Patient summary aggregation over FHIR XML
//!
//! This crate parses Patient, MedicationRequest, AllergyIntolerance,
//! Condition and social-history Observation responses and merges them
//! into a single [`PatientRecord`]. HTTP is left to a [`Transport`].

pub mod age;
pub mod aggregate;
pub mod bundle;
pub mod error;
pub mod outcome;
pub mod parse;
pub mod query;
pub mod record;
pub mod transport;
pub mod xml;

pub use aggregate::PatientAggregator;
pub use bundle::Bundle;
pub use error::{SummaryError, TransportError};
pub use outcome::{IssueSeverity, OperationOutcome, OperationOutcomeIssue};
pub use query::{ResourceQuery, ResourceType};
pub use record::{Age, Demographics, PatientRecord};
pub use transport::{FhirResponse, Transport};
pub use xml::{Element, FHIR_NAMESPACE, FhirDocument};
