//! Airdrop allocation lookup route.

use alloy::primitives::Address;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use era_common::address::{self, WalletAddress};
use era_common::types::AirdropResponse;

use crate::state::AppState;

const INVALID_ADDRESS_MESSAGE: &str = "Invalid Ethereum wallet address format";
const CACHED_MESSAGE: &str = "Data retrieved successfully (cached - instant!)";
const FRESH_MESSAGE: &str = "Data retrieved successfully (fresh from blockchain)";

pub fn router() -> Router<AppState> {
    Router::new().route("/api/airdrop/{wallet_address}", get(get_airdrop_data))
}

/// GET /api/airdrop/:wallet_address: Allocation, claim and vesting status for a wallet.
///
/// Invalid addresses are answered with `success: false` rather than an HTTP error.
async fn get_airdrop_data(
    State(state): State<AppState>,
    Path(wallet_address): Path<String>,
) -> Json<AirdropResponse> {
    let Some(address) = checked_address(&wallet_address) else {
        tracing::debug!(input = %wallet_address, "Rejected invalid wallet address");
        return Json(AirdropResponse::rejected(INVALID_ADDRESS_MESSAGE));
    };

    let lookup = state.service.lookup(&address.to_lowercase_key()).await;
    let message = if lookup.cached {
        CACHED_MESSAGE
    } else {
        FRESH_MESSAGE
    };
    Json(AirdropResponse::ok(lookup.data, message))
}

/// Validate an address; mixed-case input must also carry a valid EIP-55 checksum.
fn checked_address(raw: &str) -> Option<WalletAddress> {
    let address = address::validate(raw).ok()?;
    if address.is_mixed_case() && Address::parse_checksummed(address.as_str(), None).is_err() {
        return None;
    }
    Some(address)
}
