//! HTTP server: reads settings, prepares the store, serves the API.

use microservice_api::{app, store, telemetry, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;
    telemetry::init(&settings);

    let gateway = store::connect(&settings)?;
    if settings.testing {
        tracing::info!("TESTING is set, skipping schema creation");
    } else {
        gateway.ensure_schema().await?;
    }

    let listener = TcpListener::bind(settings.bind_address()).await?;
    tracing::info!(backend = gateway.backend(), "listening on {}", listener.local_addr()?);
    axum::serve(listener, app(AppState::new(gateway)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {}", e);
    }
    tracing::info!("shutting down");
}
