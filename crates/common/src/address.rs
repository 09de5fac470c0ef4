//! Wallet address validation.
//!
//! A wallet address is `0x` followed by exactly 40 hexadecimal digits, in any case.
//! [`validate`] trims surrounding whitespace and returns the address with its original
//! casing preserved.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Number of hex digits following the `0x` prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// Reasons a raw input string is not a usable wallet address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a wallet address")]
    EmptyInput,

    #[error("Invalid wallet address format. Expected 0x followed by 40 hexadecimal characters")]
    MalformedAddress,
}

/// A validated wallet address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form, used wherever addresses are compared or cached.
    pub fn to_lowercase_key(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Whether the hex digits mix upper and lower case (i.e. carry an EIP-55 checksum).
    pub fn is_mixed_case(&self) -> bool {
        let hex = &self.0[2..];
        hex.chars().any(|c| c.is_ascii_uppercase()) && hex.chars().any(|c| c.is_ascii_lowercase())
    }
}

/// Classify a raw input string as a wallet address.
pub fn validate(raw: &str) -> Result<WalletAddress, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let Some(hex) = trimmed.strip_prefix("0x") else {
        return Err(ValidationError::MalformedAddress);
    };

    if hex.len() != ADDRESS_HEX_LEN || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::MalformedAddress);
    }

    Ok(WalletAddress(trimmed.to_string()))
}

impl FromStr for WalletAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WalletAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for WalletAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        validate(&raw).map_err(serde::de::Error::custom)
    }
}
