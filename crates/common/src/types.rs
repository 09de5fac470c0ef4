use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response envelope of `GET /api/airdrop/{address}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirdropResponse {
    pub success: bool,
    /// Present when `success` is true
    #[serde(default)]
    pub data: Option<AirdropData>,
    /// Human-readable status; the reason on failure
    #[serde(default)]
    pub message: Option<String>,
}

impl AirdropResponse {
    pub fn ok(data: AirdropData, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Allocation details for one wallet, as served by the lookup service.
///
/// Only the allocation, claim and vesting fields are required; everything else is
/// informational and may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirdropData {
    #[serde(default)]
    pub wallet_address: Option<String>,
    pub is_claimed: bool,
    pub claimed_amount: f64,
    #[serde(default)]
    pub vested_amount: f64,
    pub total_allocation: f64,
    pub pre_claim_status: bool,
    #[serde(default)]
    pub vesting_end_date: Option<DateTime<Utc>>,
    /// Whole days until vesting completes (null or absent means 0)
    #[serde(default)]
    pub days_left_vesting: Option<u32>,
    #[serde(default)]
    pub claim_transaction_hash: Option<String>,
}

impl AirdropData {
    /// Record for a wallet with no allocation.
    pub fn empty(wallet_address: &str) -> Self {
        Self {
            wallet_address: Some(wallet_address.to_string()),
            is_claimed: false,
            claimed_amount: 0.0,
            vested_amount: 0.0,
            total_allocation: 0.0,
            pre_claim_status: false,
            vesting_end_date: None,
            days_left_vesting: Some(0),
            claim_transaction_hash: None,
        }
    }
}
