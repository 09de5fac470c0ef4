//! Era airdrop lookup API server binary entrypoint.

use std::net::SocketAddr;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use era_common::config::AppConfig;

use era_api::cache::AirdropCache;
use era_api::dune::DuneClient;
use era_api::routes::create_router;
use era_api::service::AirdropService;
use era_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("era_api=info,tower_http=info")),
        )
        .json()
        .init();

    tracing::info!("Starting Era airdrop API server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Data source and cache
    let dune = DuneClient::from_config(&config)?;
    let cache = AirdropCache::new(config.cache_hours)?;
    let service = AirdropService::new(cache, dune, config.dune_query_id);

    // Build application state
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(service);

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await?;

    tracing::info!("Era airdrop API server stopped.");
    Ok(())
}
