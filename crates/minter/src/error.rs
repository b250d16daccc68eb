use crate::host::LedgerError;
use alloy_primitives::{Address, U256};
use artmint_common::ProjectId;
use artmint_splits::{SplitError, SplitLeg};
use thiserror::Error;

/// Reasons a mint request is not admitted.
///
/// None of these are retryable without changing the request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdmissionError {
    /// The project reached its cached invocation ceiling.
    #[error("maximum number of invocations reached for project {project_id}")]
    MaxInvocationsReached {
        /// Project being minted.
        project_id: ProjectId,
    },
    /// Payment does not cover the configured price.
    #[error("must send minimum value to mint: sent {sent}, price {price}")]
    PriceTooLow {
        /// Configured price.
        price: U256,
        /// Value sent with the request.
        sent: U256,
    },
    /// The artist never configured a price.
    #[error("price not configured for project {project_id}")]
    PriceNotConfigured {
        /// Project being minted.
        project_id: ProjectId,
    },
    /// The proof does not reconstruct the project's allowlist root.
    #[error("invalid merkle proof for {address} on project {project_id}")]
    InvalidProof {
        /// Project being minted.
        project_id: ProjectId,
        /// Address the proof was checked for.
        address: Address,
    },
    /// The address already minted and the limiter is enabled.
    #[error("limit 1 mint per address: {address} already minted on project {project_id}")]
    AlreadyMinted {
        /// Project being minted.
        project_id: ProjectId,
        /// Address that already minted.
        address: Address,
    },
}

/// Caller lacks the role an operation requires.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    /// Only the artist of the project may call this.
    #[error("only artist of project {project_id}, got {caller}")]
    NotArtist {
        /// Project the call targeted.
        project_id: ProjectId,
        /// Rejected caller.
        caller: Address,
    },
    /// Only ledger-whitelisted callers may call this.
    #[error("only core whitelisted, got {caller}")]
    NotWhitelisted {
        /// Rejected caller.
        caller: Address,
    },
}

/// A funds distribution leg could not be paid.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{leg} failed: {amount} to {to}")]
pub struct TransferFailure {
    /// Leg that failed.
    pub leg: SplitLeg,
    /// Intended recipient.
    pub to: Address,
    /// Amount that could not be sent.
    pub amount: U256,
}

/// Errors returned by the allowlist minter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MinterError {
    /// The mint was refused before any effect was applied.
    #[error(transparent)]
    Admission(#[from] AdmissionError),
    /// The caller lacks the role the operation requires.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// A payout leg failed and the mint was unwound.
    #[error(transparent)]
    Transfer(#[from] TransferFailure),
    /// The payment could not be split.
    #[error(transparent)]
    Split(#[from] SplitError),
    /// The ledger refused a query or the mint itself.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    /// A state-mutating entry point was entered while another one was running.
    #[error("reentrant call")]
    Reentrancy,
}
