//! reqwest-backed [`Transport`]

use std::time::Duration;

use fhir_summary_core::{FhirResponse, Transport, TransportError};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

const FHIR_XML: &str = "application/fhir+xml";

/// HTTP transport for a FHIR REST endpoint
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str, bearer_token: &str) -> Result<FhirResponse, TransportError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(bearer_token)
            .header(ACCEPT, FHIR_XML)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        tracing::debug!(url, status, content_type = ?content_type, "FHIR response received");

        Ok(FhirResponse {
            status,
            content_type,
            body,
        })
    }
}
