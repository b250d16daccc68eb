//! Merkle allowlist minter.
//!
//! Admission runs in a fixed order: ceiling, price floor, price configured,
//! allowlist proof, per-address limiter. Once admitted, the minter records the
//! minting address, asks the ledger for a token, updates the ceiling flag and
//! only then pays out. Every external call happens after the minter's own
//! state is written, and any failure past the first effect reverts the host
//! journal and the minter's own changes together.

use crate::{
    config::MinterConfig,
    error::{AdmissionError, AuthorizationError, MinterError, TransferFailure},
    guard::ReentrancyGuard,
    host::{MintHost, ProjectInvocations},
    merkle,
    state::{MinterState, ProjectConfig, ProjectPhase},
};
use alloy_primitives::{Address, B256, U256};
use artmint_common::ProjectId;
use artmint_splits::{compute_split, transfer_plan, SplitParams, SplitRecipients};
use parking_lot::RwLock;
use std::sync::Arc;

/// Price information of a project as reported to buyers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceInfo {
    /// False until the artist sets a price.
    pub is_configured: bool,
    /// Price per token in the smallest native unit.
    pub price_per_token: U256,
    /// Currency symbol; always the native unit.
    pub currency_symbol: String,
    /// Currency handle; always the native unit.
    pub currency_address: Address,
}

/// Minter effects to undo if a mint aborts after admission.
#[derive(Debug, Default)]
struct MintUndo {
    recorded_minter: Option<Address>,
    max_flag_set: bool,
}

/// Allowlist minter bound to a host ledger.
#[derive(Debug)]
pub struct AllowlistMinter<H> {
    host: Arc<H>,
    config: MinterConfig,
    state: RwLock<MinterState>,
    guard: ReentrancyGuard,
}

impl<H: MintHost> AllowlistMinter<H> {
    /// Creates a minter for `host`.
    pub fn new(host: Arc<H>, config: MinterConfig) -> Self {
        Self {
            host,
            config,
            state: RwLock::new(MinterState::default()),
            guard: ReentrancyGuard::new(),
        }
    }

    /// Creates a minter with the default configuration.
    pub fn with_host(host: Arc<H>) -> Self {
        Self::new(host, MinterConfig::default())
    }

    /// The host this minter mints on.
    pub const fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// Static configuration.
    pub const fn config(&self) -> &MinterConfig {
        &self.config
    }

    /// Name of this minter kind.
    pub fn minter_type(&self) -> &str {
        &self.config.minter_type
    }

    // === Authorization ===

    fn ensure_artist(&self, caller: Address, project_id: ProjectId) -> Result<(), MinterError> {
        let artist = self.host.artist_of_project(project_id)?;
        if caller == artist {
            return Ok(());
        }
        tracing::warn!(target: "allowlist_minter", ?caller, project_id, "artist check denied");
        Err(AuthorizationError::NotArtist { project_id, caller }.into())
    }

    fn ensure_whitelisted(&self, caller: Address) -> Result<(), MinterError> {
        if self.host.is_whitelisted(caller) {
            return Ok(());
        }
        tracing::warn!(target: "allowlist_minter", ?caller, "whitelist check denied");
        Err(AuthorizationError::NotWhitelisted { caller }.into())
    }

    // === Artist configuration ===

    /// Replaces the allowlist root of a project. Artist only.
    ///
    /// Any 32-byte value is accepted, including zero.
    pub fn update_merkle_root(
        &self,
        caller: Address,
        project_id: ProjectId,
        root: B256,
    ) -> Result<(), MinterError> {
        let _entered = self.guard.enter()?;
        self.ensure_artist(caller, project_id)?;
        self.state.write().project_mut(project_id).merkle_root = root;
        tracing::debug!(target: "allowlist_minter", project_id, %root, "merkle root updated");
        Ok(())
    }

    /// Enables or disables the one-mint-per-address limiter. Artist only.
    pub fn set_mint_limiter_enabled(
        &self,
        caller: Address,
        project_id: ProjectId,
        enabled: bool,
    ) -> Result<(), MinterError> {
        let _entered = self.guard.enter()?;
        self.ensure_artist(caller, project_id)?;
        self.state.write().project_mut(project_id).mint_limiter_disabled = !enabled;
        tracing::debug!(target: "allowlist_minter", project_id, enabled, "mint limiter updated");
        Ok(())
    }

    /// Flips the limiter and returns whether it is now enabled. Artist only.
    pub fn toggle_mint_limiter(
        &self,
        caller: Address,
        project_id: ProjectId,
    ) -> Result<bool, MinterError> {
        let _entered = self.guard.enter()?;
        self.ensure_artist(caller, project_id)?;
        let mut state = self.state.write();
        let config = state.project_mut(project_id);
        config.mint_limiter_disabled = !config.mint_limiter_disabled;
        let enabled = !config.mint_limiter_disabled;
        tracing::debug!(target: "allowlist_minter", project_id, enabled, "mint limiter toggled");
        Ok(enabled)
    }

    /// Sets the price per token and marks the price configured. Artist only.
    ///
    /// Zero is a valid price.
    pub fn update_price_per_token(
        &self,
        caller: Address,
        project_id: ProjectId,
        price: U256,
    ) -> Result<(), MinterError> {
        let _entered = self.guard.enter()?;
        self.ensure_artist(caller, project_id)?;
        let mut state = self.state.write();
        let config = state.project_mut(project_id);
        config.price_per_token = price;
        config.price_is_configured = true;
        tracing::debug!(target: "allowlist_minter", project_id, %price, "price updated");
        Ok(())
    }

    /// Refreshes the cached ceiling from the ledger. Whitelisted callers only.
    ///
    /// Clears the "max reached" flag when the ledger reports headroom, which is
    /// how a project returns from `MaxReached` to `Active`.
    pub fn sync_max_invocations(
        &self,
        caller: Address,
        project_id: ProjectId,
    ) -> Result<ProjectInvocations, MinterError> {
        let _entered = self.guard.enter()?;
        self.ensure_whitelisted(caller)?;
        let counts = self.host.project_invocations(project_id)?;

        let mut state = self.state.write();
        let config = state.project_mut(project_id);
        config.max_invocations = counts.max_invocations;
        if counts.invocations < counts.max_invocations {
            config.max_has_been_invoked = false;
        }
        tracing::debug!(
            target: "allowlist_minter",
            project_id,
            invocations = counts.invocations,
            max_invocations = counts.max_invocations,
            max_has_been_invoked = config.max_has_been_invoked,
            "max invocations synced"
        );
        Ok(counts)
    }

    // === Allowlist ===

    /// Leaf hash of `address`.
    pub fn hash_identity(address: Address) -> B256 {
        merkle::hash_identity(address)
    }

    /// Root implied by `proof` for `address`, for off-chain verification tooling.
    pub fn process_proof_for_address(proof: &[B256], address: Address) -> B256 {
        merkle::process_proof_for_address(proof, address)
    }

    /// Returns true if `proof` shows `address` is on the project's allowlist.
    pub fn verify_address(&self, project_id: ProjectId, proof: &[B256], address: Address) -> bool {
        let root = self.state.read().project(project_id).merkle_root;
        merkle::verify_address(proof, root, address)
    }

    // === Minting ===

    /// Mints a token to the caller.
    pub fn mint(
        &self,
        caller: Address,
        project_id: ProjectId,
        proof: &[B256],
        value: U256,
    ) -> Result<U256, MinterError> {
        self.mint_to(caller, caller, project_id, proof, value)
    }

    /// Mints a token to `to`, paid for by `caller`.
    ///
    /// Admission, the limiter and any refund apply to `caller`; the proof must
    /// be for `caller`, not for `to`.
    pub fn mint_to(
        &self,
        caller: Address,
        to: Address,
        project_id: ProjectId,
        proof: &[B256],
        value: U256,
    ) -> Result<U256, MinterError> {
        let _entered = self.guard.enter()?;
        let project = self.state.read().project(project_id);
        self.check_admission(caller, project_id, &project, proof, value)?;

        let checkpoint = self.host.checkpoint();
        let mut undo = MintUndo::default();
        match self.execute_mint(caller, to, project_id, &project, value, &mut undo) {
            Ok(token_id) => {
                self.host.commit(checkpoint);
                tracing::info!(
                    target: "allowlist_minter",
                    ?caller,
                    ?to,
                    project_id,
                    %token_id,
                    %value,
                    "minted"
                );
                Ok(token_id)
            }
            Err(err) => {
                self.rollback(project_id, &undo);
                self.host.revert(checkpoint);
                tracing::warn!(target: "allowlist_minter", ?caller, project_id, %err, "mint aborted");
                Err(err)
            }
        }
    }

    fn check_admission(
        &self,
        caller: Address,
        project_id: ProjectId,
        project: &ProjectConfig,
        proof: &[B256],
        value: U256,
    ) -> Result<(), AdmissionError> {
        if project.max_has_been_invoked {
            return Err(AdmissionError::MaxInvocationsReached { project_id });
        }
        if value < project.price_per_token {
            return Err(AdmissionError::PriceTooLow { price: project.price_per_token, sent: value });
        }
        if !project.price_is_configured {
            return Err(AdmissionError::PriceNotConfigured { project_id });
        }
        if !merkle::verify_address(proof, project.merkle_root, caller) {
            return Err(AdmissionError::InvalidProof { project_id, address: caller });
        }
        Ok(())
    }

    fn execute_mint(
        &self,
        caller: Address,
        to: Address,
        project_id: ProjectId,
        project: &ProjectConfig,
        value: U256,
        undo: &mut MintUndo,
    ) -> Result<U256, MinterError> {
        {
            let mut state = self.state.write();
            if state.has_minted(project_id, caller) && !project.mint_limiter_disabled {
                return Err(AdmissionError::AlreadyMinted { project_id, address: caller }.into());
            }
            if state.record_minted(project_id, caller) {
                undo.recorded_minter = Some(caller);
            }
        }

        let token_id = self.host.mint(to, project_id, caller)?;

        // ceiling of 0 means unlimited
        if project.max_invocations > 0 &&
            self.host.invocation_of(token_id) == project.max_invocations - 1
        {
            let mut state = self.state.write();
            let config = state.project_mut(project_id);
            if !config.max_has_been_invoked {
                config.max_has_been_invoked = true;
                undo.max_flag_set = true;
                tracing::info!(target: "allowlist_minter", project_id, "max invocations reached");
            }
        }

        if !value.is_zero() {
            self.split_funds(caller, project_id, project.price_per_token, value)?;
        }
        Ok(token_id)
    }

    fn split_funds(
        &self,
        payer: Address,
        project_id: ProjectId,
        price: U256,
        value: U256,
    ) -> Result<(), MinterError> {
        let params = SplitParams {
            price,
            platform_percentage: self.host.platform_percentage(),
            secondary_payee_percentage: self.host.secondary_payee_percentage(project_id)?,
        };
        let split = compute_split(value, &params)?;
        let recipients = SplitRecipients {
            payer,
            platform: self.host.platform_address(),
            secondary_payee: self.host.secondary_payee_address(project_id)?,
            artist: self.host.artist_of_project(project_id)?,
        };

        for transfer in transfer_plan(&split, &recipients) {
            if !self.host.send(transfer.to, transfer.amount) {
                return Err(TransferFailure {
                    leg: transfer.leg,
                    to: transfer.to,
                    amount: transfer.amount,
                }
                .into());
            }
            tracing::debug!(
                target: "allowlist_minter",
                leg = %transfer.leg,
                to = ?transfer.to,
                amount = %transfer.amount,
                "funds sent"
            );
        }
        Ok(())
    }

    fn rollback(&self, project_id: ProjectId, undo: &MintUndo) {
        let mut state = self.state.write();
        if let Some(minter) = undo.recorded_minter {
            state.forget_minted(project_id, minter);
        }
        if undo.max_flag_set {
            state.project_mut(project_id).max_has_been_invoked = false;
        }
    }

    // === Views ===

    /// Price information of a project.
    pub fn price_info(&self, project_id: ProjectId) -> PriceInfo {
        let project = self.state.read().project(project_id);
        PriceInfo {
            is_configured: project.price_is_configured,
            price_per_token: project.price_per_token,
            currency_symbol: self.config.currency_symbol.clone(),
            currency_address: self.config.currency_address,
        }
    }

    /// Full minter configuration of a project.
    pub fn project_config(&self, project_id: ProjectId) -> ProjectConfig {
        self.state.read().project(project_id)
    }

    /// Lifecycle phase of a project.
    pub fn project_phase(&self, project_id: ProjectId) -> ProjectPhase {
        self.project_config(project_id).phase()
    }

    /// Returns true if `address` has minted on `project_id` through this minter.
    pub fn has_minted(&self, project_id: ProjectId, address: Address) -> bool {
        self.state.read().has_minted(project_id, address)
    }
}
