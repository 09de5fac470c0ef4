//! Client side of the Era airdrop dashboard.
//!
//! A search runs raw input through the address validator, asks an [`AirdropSource`] for the
//! wallet's allocation and publishes the outcome as a [`LookupState`] that the presentation
//! layer reads.

pub mod controller;
pub mod display;
pub mod source;
pub mod state;

pub use controller::AirdropLookupController;
pub use source::{AirdropSource, HttpAirdropSource, TransportError};
pub use state::{AirdropRecord, LookupError, LookupState};
