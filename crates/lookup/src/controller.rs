//! Airdrop lookup controller. Owns the search lifecycle and the published [`LookupState`].
//!
//! Every search takes a sequence number when it starts. A completion is only applied if no
//! newer search has started since, so a slow response can never overwrite the outcome of a
//! search the user issued after it. Superseded requests are not cancelled; their responses
//! are dropped when they arrive.
//!
//! Issuing a sequence number and checking it on completion both happen under the watch
//! channel's write lock, which keeps check-and-write atomic on a multi-threaded runtime.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use era_common::address;

use crate::source::AirdropSource;
use crate::state::{self, LookupError, LookupState};

pub struct AirdropLookupController<S> {
    source: S,
    state: watch::Sender<LookupState>,
    /// Sequence number of the most recently started search
    issued: AtomicU64,
}

impl<S: AirdropSource> AirdropLookupController<S> {
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(LookupState::Idle);
        Self {
            source,
            state,
            issued: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LookupState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<LookupState> {
        self.state.subscribe()
    }

    /// Run one search for `raw` to completion.
    ///
    /// Invalid input fails immediately without a request. Otherwise the state moves to
    /// `Loading`, a single lookup is issued, and the outcome replaces the state unless a
    /// newer search has started in the meantime.
    pub async fn search(&self, raw: &str) {
        let address = match address::validate(raw) {
            Ok(address) => address,
            Err(err) => {
                let seq = self.begin(LookupState::Failed(err.into()));
                tracing::debug!(seq, error = %err, "Rejected wallet address input");
                return;
            }
        };

        let seq = self.begin(LookupState::Loading);
        tracing::debug!(seq, address = %address, "Airdrop lookup started");

        let outcome = match self.source.fetch(&address).await {
            Ok(response) => state::interpret(response),
            Err(err) => {
                tracing::warn!(seq, address = %address, error = %err, "Airdrop lookup transport failure");
                Err(LookupError::TransportFailure)
            }
        };

        let next = match outcome {
            Ok(record) => {
                tracing::info!(
                    seq,
                    address = %address,
                    total_allocation = record.total_allocation,
                    "Airdrop lookup succeeded"
                );
                LookupState::Success(record)
            }
            Err(err) => {
                tracing::info!(seq, address = %address, reason = %err, "Airdrop lookup failed");
                LookupState::Failed(err)
            }
        };

        if !self.complete(seq, next) {
            tracing::debug!(seq, address = %address, "Discarding stale airdrop lookup response");
        }
    }

    /// Start a new search: take the next sequence number and publish its first state.
    fn begin(&self, next: LookupState) -> u64 {
        let mut seq = 0;
        self.state.send_modify(|state| {
            seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            *state = next;
        });
        seq
    }

    /// Publish the outcome of search `seq` if it is still the latest one.
    fn complete(&self, seq: u64, next: LookupState) -> bool {
        self.state.send_if_modified(|state| {
            if self.issued.load(Ordering::SeqCst) != seq {
                return false;
            }
            *state = next;
            true
        })
    }
}
