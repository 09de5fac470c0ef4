//! Transport to the airdrop lookup service.

use std::future::Future;

use thiserror::Error;

use era_common::address::WalletAddress;
use era_common::types::AirdropResponse;

/// Transport-level failures: the service could not be reached or did not answer with
/// a readable envelope.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unreadable response (HTTP {status}): {reason}")]
    Decode { status: u16, reason: String },
}

/// Something that can answer an allocation lookup for a wallet.
pub trait AirdropSource: Send + Sync {
    fn fetch(
        &self,
        address: &WalletAddress,
    ) -> impl Future<Output = Result<AirdropResponse, TransportError>> + Send;
}

/// [`AirdropSource`] backed by `GET {base_url}/api/airdrop/{address}`.
#[derive(Debug, Clone)]
pub struct HttpAirdropSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAirdropSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("era-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Lookup URL for an address; the address keeps the casing it was entered with.
    pub fn endpoint(&self, address: &WalletAddress) -> String {
        format!("{}/api/airdrop/{}", self.base_url, address)
    }
}

impl AirdropSource for HttpAirdropSource {
    async fn fetch(&self, address: &WalletAddress) -> Result<AirdropResponse, TransportError> {
        let url = self.endpoint(address);
        tracing::debug!(%url, "Requesting airdrop allocation");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| TransportError::Decode {
            status: status.as_u16(),
            reason: e.to_string(),
        })
    }
}
