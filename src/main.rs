use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pms_core::{
    config::{create_if_missing_from_env_value, patient_data_file_from_env_value},
    CoreConfig, JsonFileStore, PatientService,
};

/// Main entry point for the patient management service
///
/// Resolves configuration once, opens the patient document and serves the REST API until
/// interrupted.
///
/// # Environment Variables
/// - `PMS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PATIENT_DATA_FILE`: JSON document holding every patient (default: "patients.json")
/// - `PATIENT_DATA_CREATE`: create an empty document when missing (default: "false")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid or the patient document cannot be opened,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pms_run=info".parse()?)
                .add_directive("pms_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("PMS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::new(
        patient_data_file_from_env_value(std::env::var("PATIENT_DATA_FILE").ok()),
        create_if_missing_from_env_value(std::env::var("PATIENT_DATA_CREATE").ok())?,
    )?;
    let store = JsonFileStore::open(&cfg)?;
    let patient_service = PatientService::new(Arc::new(store));

    let app = api_rest::router(patient_service);

    tracing::info!("++ Starting PMS REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- PMS REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
