//! Create the tables and load sample data once.

use microservice_api::seed::{seed_sample_data, SeedOutcome};
use microservice_api::{store, telemetry, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;
    telemetry::init(&settings);

    let gateway = store::connect(&settings)?;
    gateway.ensure_schema().await?;
    match seed_sample_data(gateway.as_ref()).await? {
        SeedOutcome::Skipped => tracing::info!("sample data already exists, skipping seed"),
        SeedOutcome::Seeded { users, products } => {
            tracing::info!(users, products, "sample data created")
        }
    }
    Ok(())
}
