//! Airdrop lookup service: cache first, then the Dune allocation query.
//!
//! Lookups never fail outright. A missing Dune key, an empty result set and a failed
//! query all yield the zero-allocation record, and that record is cached like any other.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use era_common::types::AirdropData;

use crate::cache::AirdropCache;
use crate::dune::{self, DuneClient};

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub data: AirdropData,
    /// Served from cache rather than a fresh query
    pub cached: bool,
}

pub struct AirdropService {
    cache: AirdropCache,
    dune: Option<DuneClient>,
    query_id: u64,
    total_queries: AtomicU64,
}

impl AirdropService {
    pub fn new(cache: AirdropCache, dune: Option<DuneClient>, query_id: u64) -> Self {
        if dune.is_none() {
            tracing::warn!("No Dune API key configured; every lookup returns a zero allocation");
        }
        Self {
            cache,
            dune,
            query_id,
            total_queries: AtomicU64::new(0),
        }
    }

    /// Look up allocation data for a lowercased wallet address.
    pub async fn lookup(&self, wallet_address: &str) -> Lookup {
        let now = Utc::now();
        self.total_queries.fetch_add(1, Ordering::Relaxed);

        if let Some(data) = self.cache.get(wallet_address, now).await {
            tracing::info!(wallet = wallet_address, "Serving cached airdrop data");
            return Lookup { data, cached: true };
        }

        tracing::info!(wallet = wallet_address, "Fresh airdrop query");
        let data = match &self.dune {
            None => AirdropData::empty(wallet_address),
            Some(client) => {
                match client
                    .run_query(self.query_id, &[("wallet_address", wallet_address)])
                    .await
                {
                    Ok(rows) => rows
                        .first()
                        .map(|row| dune::row_to_airdrop(row, wallet_address, now))
                        .unwrap_or_else(|| AirdropData::empty(wallet_address)),
                    Err(e) => {
                        tracing::error!(wallet = wallet_address, error = %e, "Airdrop query failed");
                        AirdropData::empty(wallet_address)
                    }
                }
            }
        };

        self.cache
            .insert(wallet_address.to_string(), data.clone(), now)
            .await;
        Lookup {
            data,
            cached: false,
        }
    }

    pub fn total_queries(&self) -> u64 {
        self.total_queries.load(Ordering::Relaxed)
    }

    pub async fn cached_addresses(&self) -> usize {
        self.cache.len().await
    }

    pub fn cache_hours(&self) -> u64 {
        self.cache.ttl_hours()
    }
}
