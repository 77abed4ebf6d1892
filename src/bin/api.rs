use anyhow::Context;
use feedback_store::api::{AppState, handler};
use feedback_store::core::config::AppConfig;
use feedback_store::store::DynamoStore;
use feedback_store::store::dynamo::build_client;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    feedback_store::setup_logging();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    info!(
        feedback_table = %config.feedback_table,
        app_info_table = %config.app_info_table,
        region = %config.region,
        "Starting feedback store API"
    );

    let client = build_client(&config).await;
    let state = AppState::new(
        DynamoStore::from_config(client.clone(), &config.feedback_store()),
        DynamoStore::from_config(client, &config.app_info_store()),
    );

    lambda_runtime::run(lambda_runtime::service_fn(|event| handler(&state, event))).await
}
