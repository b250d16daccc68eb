//! Interfaces of the external systems the minter runs against.
//!
//! The minter owns only its allowlist state. Token ownership, invocation
//! counts, platform percentages and value transfers live in the host
//! environment and are reached through the traits below.

use alloy_primitives::{Address, U256};
use artmint_common::{invocation_of, ProjectId};
use thiserror::Error;

/// Invocation counters the ledger keeps for a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectInvocations {
    /// Number of tokens minted so far.
    pub invocations: u64,
    /// Ceiling configured on the ledger.
    pub max_invocations: u64,
}

/// Failure reported by the ledger.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The ledger has no project with this id.
    #[error("unknown project {0}")]
    UnknownProject(ProjectId),
    /// The ledger refused to mint.
    #[error("ledger refused mint: {0}")]
    MintRejected(String),
}

/// The core token ledger.
pub trait Ledger: Send + Sync {
    /// Returns true if `caller` may perform whitelisted-only operations.
    fn is_whitelisted(&self, caller: Address) -> bool;

    /// Returns the artist address of a project.
    fn artist_of_project(&self, project_id: ProjectId) -> Result<Address, LedgerError>;

    /// Mints the next token of `project_id` to `to`, paid for by `payer`.
    fn mint(&self, to: Address, project_id: ProjectId, payer: Address)
        -> Result<U256, LedgerError>;

    /// Returns the current invocation count and ceiling of a project.
    fn project_invocations(&self, project_id: ProjectId)
        -> Result<ProjectInvocations, LedgerError>;

    /// Platform share of every sale, in percent.
    fn platform_percentage(&self) -> u8;

    /// Recipient of the platform share.
    fn platform_address(&self) -> Address;

    /// Secondary payee share of a project's proceeds, in percent.
    fn secondary_payee_percentage(&self, project_id: ProjectId) -> Result<u8, LedgerError>;

    /// Recipient of the secondary payee share.
    fn secondary_payee_address(&self, project_id: ProjectId) -> Result<Address, LedgerError>;

    /// Zero-based position of a token within its project.
    ///
    /// Defaults to the `token_id % 1_000_000` convention.
    fn invocation_of(&self, token_id: U256) -> u64 {
        invocation_of(token_id)
    }
}

/// Native value transfer primitive.
pub trait ValueTransfer: Send + Sync {
    /// Sends `amount` to `to`. Never panics; returns false on failure.
    fn send(&self, to: Address, amount: U256) -> bool;
}

/// Opaque marker returned by [`Journal::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalCheckpoint(pub usize);

/// Transactional context of the host.
///
/// Everything the ledger and the transfer primitive did after a checkpoint is
/// undone by [`Journal::revert`].
pub trait Journal: Send + Sync {
    /// Opens a new checkpoint.
    fn checkpoint(&self) -> JournalCheckpoint;

    /// Keeps all changes made since `checkpoint`.
    fn commit(&self, checkpoint: JournalCheckpoint);

    /// Discards all changes made since `checkpoint`.
    fn revert(&self, checkpoint: JournalCheckpoint);
}

/// Everything a minter needs from its host.
pub trait MintHost: Ledger + ValueTransfer + Journal {}

impl<T> MintHost for T where T: Ledger + ValueTransfer + Journal {}
