//! Shared application state for the Axum API server.

use std::sync::Arc;

use crate::service::AirdropService;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AirdropService>,
}

impl AppState {
    pub fn new(service: AirdropService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
