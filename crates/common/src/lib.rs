//! Shared building blocks for the Era airdrop dashboard: wallet address validation,
//! the lookup service's wire envelope, configuration and error types.

pub mod address;
pub mod config;
pub mod error;
pub mod types;
