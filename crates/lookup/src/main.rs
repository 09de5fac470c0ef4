//! Era airdrop dashboard: interactive terminal front end for wallet allocation lookups.
//!
//! Each line typed on stdin is submitted as a search; the current lookup state is
//! re-rendered on stdout whenever it changes. Logs go to stderr.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;

use era_common::config::AppConfig;
use era_lookup::display::{self, NumberLocale};
use era_lookup::{AirdropLookupController, HttpAirdropSource, LookupState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("era_lookup=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    let locale = NumberLocale::from_tag(&config.display_locale);
    tracing::info!(api = %config.api_base_url, "Starting Era airdrop dashboard");

    let source = HttpAirdropSource::new(config.api_base_url.clone())?;
    let controller = Arc::new(AirdropLookupController::new(source));

    // Re-render on every state change
    let mut states = controller.subscribe();
    let renderer = tokio::spawn(async move {
        println!("{}", display::render(&states.borrow_and_update(), locale));
        while states.changed().await.is_ok() {
            let state: LookupState = states.borrow_and_update().clone();
            println!("\n{}", display::render(&state, locale));
        }
    });

    let mut searches = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(input) => {
                        let controller = Arc::clone(&controller);
                        searches.spawn(async move { controller.search(&input).await });
                    }
                    None => break,
                }
            }
            Some(joined) = searches.join_next() => {
                if let Err(e) = joined {
                    tracing::error!(error = %e, "Search task panicked");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received shutdown signal, exiting");
                renderer.abort();
                return Ok(());
            }
        }
    }

    // Input closed: let in-flight searches finish so their outcome is shown
    while let Some(joined) = searches.join_next().await {
        if let Err(e) = joined {
            tracing::error!(error = %e, "Search task panicked");
        }
    }

    drop(controller);
    renderer.await?;
    Ok(())
}
