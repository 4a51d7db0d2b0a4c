//! The seam between the aggregator and whatever performs HTTP

use std::future::Future;

use crate::error::TransportError;

/// Raw response handed back by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FhirResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl FhirResponse {
    /// An XML 200 response, mostly for tests and fakes
    pub fn ok_xml(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: Some("application/fhir+xml; charset=utf-8".to_string()),
            body: body.into(),
        }
    }

    /// True if the declared content type is some flavour of XML
    pub fn is_xml(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("xml"))
    }
}

/// Issues authenticated GET requests against a FHIR endpoint.
///
/// Connection handling, timeouts and retries belong to the implementor.
pub trait Transport {
    fn get(
        &self,
        url: &str,
        bearer_token: &str,
    ) -> impl Future<Output = Result<FhirResponse, TransportError>> + Send;
}
