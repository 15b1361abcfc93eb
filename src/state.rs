//! Shared application state for all routes.

use crate::store::Gateway;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Every request opens its own session from this gateway.
    pub gateway: Arc<dyn Gateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}
