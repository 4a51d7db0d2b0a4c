//! Client configuration

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://fhir.epic.com/interconnect-fhir-oauth/api/FHIR/R4";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub access_token: Option<String>,
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("FHIR_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());

        let timeout_secs = lookup("FHIR_TIMEOUT_SECS")
            .and_then(|secs| secs.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            access_token: lookup("FHIR_ACCESS_TOKEN").filter(|t| !t.trim().is_empty()),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
