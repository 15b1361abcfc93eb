//! Router assembly: common routes, resource routes and the middleware stack.

mod common;
mod resources;

use crate::state::AppState;
use axum::{http::HeaderValue, Router};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

pub use common::common_routes;
pub use resources::{product_routes, user_routes};

/// Browser origins allowed to call the API with credentials.
pub const ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:8000"];

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Credentialed CORS cannot use wildcards, so methods and headers mirror the preflight.
fn cors() -> CorsLayer {
    let origins = ALLOWED_ORIGINS.iter().copied().map(HeaderValue::from_static);
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// The full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes())
        .merge(user_routes())
        .merge(product_routes())
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}
