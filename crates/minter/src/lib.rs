//! # Allowlist Minter
//!
//! Gatekeeper between buyers and a token ledger. A buyer mints a token of a
//! project by presenting a Merkle proof that their address is on the project's
//! allowlist and paying at least the configured price. Proceeds are split
//! between the platform, an optional secondary payee and the artist, and any
//! excess is refunded.
//!
//! ## Admission
//!
//! | Check | Error |
//! |-------|-------|
//! | cached ceiling not reached | [`AdmissionError::MaxInvocationsReached`] |
//! | payment covers price | [`AdmissionError::PriceTooLow`] |
//! | price configured | [`AdmissionError::PriceNotConfigured`] |
//! | proof reconstructs root | [`AdmissionError::InvalidProof`] |
//! | first mint, or limiter off | [`AdmissionError::AlreadyMinted`] |
//!
//! ## Host
//!
//! The ledger, value transfer and transactional journal are external and
//! reached through the traits in [`host`]. A mint either completes every
//! effect (token, minter records, all transfers) or none of them.
//!
//! ```ignore
//! use artmint_minter::{AllowlistMinter, AllowlistTree};
//!
//! let tree = AllowlistTree::from_addresses([alice, bob]);
//! let minter = AllowlistMinter::with_host(host);
//! minter.update_merkle_root(artist, project_id, tree.root())?;
//! minter.update_price_per_token(artist, project_id, price)?;
//! let token_id = minter.mint(alice, project_id, &tree.proof(alice).unwrap(), price)?;
//! ```

pub mod config;
pub mod error;
pub mod guard;
pub mod host;
pub mod merkle;
pub mod minter;
pub mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, MinterConfig};
pub use error::{AdmissionError, AuthorizationError, MinterError, TransferFailure};
pub use guard::{Entered, ReentrancyGuard};
pub use host::{
    Journal, JournalCheckpoint, Ledger, LedgerError, MintHost, ProjectInvocations, ValueTransfer,
};
pub use merkle::AllowlistTree;
pub use minter::{AllowlistMinter, PriceInfo};
pub use state::{ProjectConfig, ProjectPhase};
