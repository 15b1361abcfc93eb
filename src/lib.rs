//! Microservice API: users and products over a relational store.

pub mod docs;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod seed;
pub mod service;
pub mod settings;
pub mod state;
pub mod store;
pub mod telemetry;

pub use error::{AppError, ConfigError};
pub use routes::app;
pub use settings::Settings;
pub use state::AppState;
pub use store::{Gateway, MemoryGateway, PgGateway, Session};
