//! Lookup state model read by the presentation layer.

use thiserror::Error;

use era_common::address::ValidationError;
use era_common::types::{AirdropData, AirdropResponse};

/// Shown for every transport-level failure.
pub const CONNECTION_FAILED_MESSAGE: &str = "Failed to connect to the server. Please try again.";

/// Shown when the service rejects a lookup without saying why.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch airdrop data";

/// Normalized result of a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct AirdropRecord {
    pub total_allocation: f64,
    pub claimed_amount: f64,
    pub days_left_vesting: u32,
    pub is_claimed: bool,
    pub pre_claim_status: bool,
}

impl AirdropRecord {
    /// A zero allocation means the wallet is not part of the airdrop.
    pub fn is_eligible(&self) -> bool {
        self.total_allocation != 0.0
    }
}

impl From<AirdropData> for AirdropRecord {
    fn from(data: AirdropData) -> Self {
        Self {
            total_allocation: data.total_allocation,
            claimed_amount: data.claimed_amount,
            days_left_vesting: data.days_left_vesting.unwrap_or(0),
            is_claimed: data.is_claimed,
            pre_claim_status: data.pre_claim_status,
        }
    }
}

/// Why a search ended without a record. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("{}", CONNECTION_FAILED_MESSAGE)]
    TransportFailure,

    #[error("{0}")]
    ServiceRejection(String),
}

/// Current state of the lookup. Exactly one holds at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Loading,
    Success(AirdropRecord),
    Failed(LookupError),
}

impl LookupState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LookupState::Loading)
    }

    pub fn record(&self) -> Option<&AirdropRecord> {
        match self {
            LookupState::Success(record) => Some(record),
            _ => None,
        }
    }

    /// User-facing failure text, if the last search failed.
    pub fn error_message(&self) -> Option<String> {
        match self {
            LookupState::Failed(err) => Some(err.to_string()),
            _ => None,
        }
    }
}

/// Interpret a service envelope.
///
/// A missing or blank rejection message falls back to [`FETCH_FAILED_MESSAGE`], as does
/// a `success: true` envelope without a `data` object.
pub fn interpret(response: AirdropResponse) -> Result<AirdropRecord, LookupError> {
    if response.success {
        return match response.data {
            Some(data) => Ok(AirdropRecord::from(data)),
            None => Err(LookupError::ServiceRejection(FETCH_FAILED_MESSAGE.to_string())),
        };
    }

    let message = response
        .message
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| FETCH_FAILED_MESSAGE.to_string());
    Err(LookupError::ServiceRejection(message))
}
