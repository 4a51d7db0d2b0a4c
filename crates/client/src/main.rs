//! fhir-summary: print one patient's clinical summary as JSON.
//!
//! Usage: `fhir-summary <patient-fhir-id>`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fhir_summary_client::config::Config;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();

    let Some(patient_id) = std::env::args().nth(1) else {
        eprintln!("usage: fhir-summary <patient-fhir-id>");
        std::process::exit(2);
    };

    // Load configuration
    let config = Config::from_env();
    if config.access_token.is_none() {
        tracing::warn!("FHIR_ACCESS_TOKEN not set, requests cannot be authenticated");
    }
    tracing::info!(base_url = %config.base_url, "Using FHIR endpoint");

    let aggregator = match fhir_summary_client::build_aggregator(&config) {
        Ok(aggregator) => aggregator,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            std::process::exit(1);
        }
    };

    let record = match aggregator
        .aggregate(config.access_token.as_deref(), &patient_id)
        .await
    {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(error = %e, "Could not build patient summary");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&record) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize patient summary");
            std::process::exit(1);
        }
    }
}
