//! Common routes: health, readiness, service info, API docs.

use crate::docs::{openapi, DOCS_PATH};
use crate::handlers::health::{health, readiness, root};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn common_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/readiness", get(readiness))
        .route(DOCS_PATH, get(openapi))
        .route("/openapi.json", get(openapi))
}
