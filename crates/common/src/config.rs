use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the airdrop lookup service used by the dashboard
    pub api_base_url: String,

    /// Language tag controlling number separators in the dashboard (default: en-US)
    pub display_locale: String,

    /// Port the lookup service listens on (default: 8000)
    pub port: u16,

    /// Dune API key; without it every lookup yields a zero allocation
    pub dune_api_key: Option<String>,

    /// Dune API base URL
    pub dune_api_url: String,

    /// Dune query holding the airdrop allocations
    pub dune_query_id: u64,

    /// Interval between Dune execution status polls in milliseconds
    pub dune_poll_interval_ms: u64,

    /// Upper bound on how long a single Dune execution is awaited
    pub dune_max_wait_secs: u64,

    /// How long cached lookups stay fresh (default: 24)
    pub cache_hours: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_base_url: std::env::var("AIRDROP_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            display_locale: std::env::var("DISPLAY_LOCALE")
                .unwrap_or_else(|_| "en-US".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid u16"))?,
            dune_api_key: std::env::var("DUNE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            dune_api_url: std::env::var("DUNE_API_URL")
                .unwrap_or_else(|_| "https://api.dune.com".to_string()),
            dune_query_id: std::env::var("DUNE_QUERY_ID")
                .unwrap_or_else(|_| "5515686".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DUNE_QUERY_ID must be a valid u64"))?,
            dune_poll_interval_ms: std::env::var("DUNE_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DUNE_POLL_INTERVAL_MS must be a valid u64"))?,
            dune_max_wait_secs: std::env::var("DUNE_MAX_WAIT_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DUNE_MAX_WAIT_SECS must be a valid u64"))?,
            cache_hours: std::env::var("CACHE_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("CACHE_HOURS must be a valid u64"))?,
        })
    }
}
