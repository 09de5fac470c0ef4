//! Era airdrop lookup service.
//!
//! Serves `GET /api/airdrop/{address}` from an in-memory cache in front of a Dune query,
//! plus service stats and health endpoints.

pub mod cache;
pub mod dune;
pub mod routes;
pub mod service;
pub mod state;
