use crate::query::ResourceType;
use thiserror::Error;

/// Boxed error handed back by a [`Transport`](crate::transport::Transport)
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Patient summary error types
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Authentication required: no bearer token has been established")]
    AuthenticationRequired,

    #[error("Transport error while fetching {resource}: {source}")]
    Transport {
        resource: ResourceType,
        #[source]
        source: TransportError,
    },

    #[error("Failed to retrieve {resource} data: {body}, Status Code: {status}")]
    UnexpectedStatus {
        resource: ResourceType,
        status: u16,
        body: String,
    },

    #[error("Empty response received from {resource} API")]
    EmptyResponse { resource: ResourceType },

    #[error("Unsupported response format for {resource}: {}", .content_type.as_deref().unwrap_or("<none>"))]
    UnsupportedFormat {
        resource: ResourceType,
        content_type: Option<String>,
    },

    #[error("Malformed FHIR XML: {0}")]
    Parse(String),

    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },
}

impl From<quick_xml::Error> for SummaryError {
    fn from(err: quick_xml::Error) -> Self {
        SummaryError::Parse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for SummaryError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        SummaryError::Parse(format!("bad attribute: {}", err))
    }
}

impl From<quick_xml::escape::EscapeError> for SummaryError {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        SummaryError::Parse(format!("bad escape sequence: {}", err))
    }
}

impl SummaryError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            SummaryError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
