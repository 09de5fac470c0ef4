//! Health check endpoints.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/", get(api_root))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "era-airdrop-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /api/: Service banner.
async fn api_root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Era Airdrop Dashboard API",
        "status": "operational"
    }))
}
