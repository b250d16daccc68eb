//! Per-project allowlist minter state.

use alloy_primitives::{Address, B256, U256};
use artmint_common::ProjectId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Minter configuration of a single project.
///
/// Projects never touched by their artist read as the all-zero default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Root of the allowlist Merkle tree.
    pub merkle_root: B256,
    /// When true, addresses may mint more than once.
    pub mint_limiter_disabled: bool,
    /// Cached ledger ceiling; zero means unlimited.
    pub max_invocations: u64,
    /// Cached "ceiling reached" flag.
    pub max_has_been_invoked: bool,
    /// Price per token in the smallest native unit.
    pub price_per_token: U256,
    /// Distinguishes a configured zero price from no price at all.
    pub price_is_configured: bool,
}

impl ProjectConfig {
    /// Lifecycle phase implied by this configuration.
    pub fn phase(&self) -> ProjectPhase {
        if !self.price_is_configured {
            ProjectPhase::Unconfigured
        } else if self.max_has_been_invoked {
            ProjectPhase::MaxReached
        } else if self.merkle_root.is_zero() {
            ProjectPhase::PriceConfigured
        } else {
            ProjectPhase::Active
        }
    }
}

/// Lifecycle of a project on the minter.
///
/// `Unconfigured -> PriceConfigured -> Active <-> MaxReached`. A project only
/// leaves `MaxReached` through a max-invocations sync that finds headroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectPhase {
    /// No price configured; every mint fails.
    Unconfigured,
    /// Price set but no allowlist root yet.
    PriceConfigured,
    /// Mints are admitted.
    Active,
    /// The cached ceiling was reached.
    MaxReached,
}

/// All state owned by a minter instance.
#[derive(Debug, Default)]
pub(crate) struct MinterState {
    projects: HashMap<ProjectId, ProjectConfig>,
    minted_by: HashSet<(ProjectId, Address)>,
}

impl MinterState {
    pub(crate) fn project(&self, project_id: ProjectId) -> ProjectConfig {
        self.projects.get(&project_id).copied().unwrap_or_default()
    }

    pub(crate) fn project_mut(&mut self, project_id: ProjectId) -> &mut ProjectConfig {
        self.projects.entry(project_id).or_default()
    }

    pub(crate) fn has_minted(&self, project_id: ProjectId, address: Address) -> bool {
        self.minted_by.contains(&(project_id, address))
    }

    /// Records a mint; returns false if it was already recorded.
    pub(crate) fn record_minted(&mut self, project_id: ProjectId, address: Address) -> bool {
        self.minted_by.insert((project_id, address))
    }

    pub(crate) fn forget_minted(&mut self, project_id: ProjectId, address: Address) {
        self.minted_by.remove(&(project_id, address));
    }
}
