//! Tracing subscriber setup shared by the binaries.

use crate::settings::Settings;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset. `DEBUG` turns on SQL statement logging.
pub fn default_filter(settings: &Settings) -> &'static str {
    if settings.debug {
        "microservice_api=debug,tower_http=debug,sqlx::query=debug"
    } else {
        "microservice_api=info,tower_http=info,sqlx::query=warn"
    }
}

pub fn init(settings: &Settings) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(settings))),
        )
        .init();
}
