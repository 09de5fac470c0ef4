//! Lookup statistics.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/stats", get(get_stats))
}

#[derive(Debug, Serialize)]
pub struct Stats {
    pub total_queries: u64,
    pub cached_addresses: usize,
    pub cache_hours: u64,
    pub status: &'static str,
}

/// GET /api/stats: Query counter and cache size.
async fn get_stats(State(state): State<AppState>) -> Json<Stats> {
    Json(Stats {
        total_queries: state.service.total_queries(),
        cached_addresses: state.service.cached_addresses().await,
        cache_hours: state.service.cache_hours(),
        status: "operational",
    })
}
