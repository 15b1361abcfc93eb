//! Liveness, readiness and service info. None of these touch the store.

use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SERVICE_NAME: &str = "microservice-api";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthBody {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadyBody {
    pub ready: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootBody {
    pub message: String,
    pub version: String,
    pub docs: String,
    pub database: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Process is alive", body = HealthBody))
)]
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "healthy".into(),
        service: SERVICE_NAME.into(),
        version: VERSION.into(),
    })
}

/// Always ready; the store is not probed.
#[utoipa::path(
    get,
    path = "/readiness",
    tag = "Health",
    responses((status = 200, description = "Ready to serve", body = ReadyBody))
)]
pub async fn readiness() -> Json<ReadyBody> {
    Json(ReadyBody {
        ready: true,
        message: "API is ready to receive requests".into(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service info", body = RootBody))
)]
pub async fn root(State(state): State<AppState>) -> Json<RootBody> {
    Json(RootBody {
        message: "Welcome to Microservice API".into(),
        version: VERSION.into(),
        docs: crate::docs::DOCS_PATH.into(),
        database: state.gateway.backend().into(),
    })
}
