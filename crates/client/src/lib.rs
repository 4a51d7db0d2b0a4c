//! fhir-summary-client library crate
//!
//! Exposes `config` and the HTTP transport for integration tests.
//! The binary entrypoint is in `main.rs`.

pub mod config;
pub mod http;

use fhir_summary_core::PatientAggregator;

use config::Config;
use http::HttpTransport;

/// Build an aggregator wired to the configured endpoint
pub fn build_aggregator(config: &Config) -> Result<PatientAggregator<HttpTransport>, reqwest::Error> {
    let transport = HttpTransport::new(config.timeout)?;
    Ok(PatientAggregator::new(transport, config.base_url.clone()))
}
