//! In-memory host for exercising the minter without a real ledger.

use crate::host::{
    Journal, JournalCheckpoint, Ledger, LedgerError, ProjectInvocations, ValueTransfer,
};
use alloy_primitives::{Address, U256};
use artmint_common::{token_id_for, ProjectId};
use parking_lot::{Mutex, RwLock};
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt,
    sync::Arc,
};

/// Callback run on every [`ValueTransfer::send`] before the value is credited.
/// Returning false fails the transfer.
pub type SendHook = Arc<dyn Fn(Address, U256) -> bool + Send + Sync>;

/// Ledger-side data of a project.
#[derive(Debug, Clone, Default)]
pub struct MemoryProject {
    pub artist: Address,
    pub invocations: u64,
    /// Zero disables the ledger-side ceiling.
    pub max_invocations: u64,
    pub secondary_payee: Address,
    pub secondary_payee_percentage: u8,
}

#[derive(Debug, Clone, Default)]
struct HostState {
    projects: HashMap<ProjectId, MemoryProject>,
    owners: BTreeMap<U256, Address>,
    balances: HashMap<Address, U256>,
    whitelisted: HashSet<Address>,
    rejecting: HashSet<Address>,
    platform: Address,
    platform_percentage: u8,
}

/// Journaled in-memory ledger and value transfer.
///
/// Each checkpoint snapshots the whole state; reverting restores the snapshot.
pub struct MemoryHost {
    state: Mutex<HostState>,
    snapshots: Mutex<Vec<HostState>>,
    send_hook: RwLock<Option<SendHook>>,
}

impl fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryHost")
            .field("state", &self.state)
            .field("snapshots", &self.snapshots.lock().len())
            .field("send_hook", &self.send_hook.read().is_some())
            .finish()
    }
}

impl MemoryHost {
    pub fn new(platform: Address, platform_percentage: u8) -> Self {
        Self {
            state: Mutex::new(HostState { platform, platform_percentage, ..Default::default() }),
            snapshots: Mutex::new(Vec::new()),
            send_hook: RwLock::new(None),
        }
    }

    pub fn add_project(&self, project_id: ProjectId, project: MemoryProject) {
        self.state.lock().projects.insert(project_id, project);
    }

    pub fn set_max_invocations(&self, project_id: ProjectId, max_invocations: u64) {
        if let Some(project) = self.state.lock().projects.get_mut(&project_id) {
            project.max_invocations = max_invocations;
        }
    }

    pub fn whitelist(&self, caller: Address) {
        self.state.lock().whitelisted.insert(caller);
    }

    /// Makes every transfer to `to` fail.
    pub fn reject_transfers_to(&self, to: Address) {
        self.state.lock().rejecting.insert(to);
    }

    pub fn accept_transfers_to(&self, to: Address) {
        self.state.lock().rejecting.remove(&to);
    }

    pub fn set_send_hook(&self, hook: SendHook) {
        *self.send_hook.write() = Some(hook);
    }

    pub fn balance_of(&self, address: Address) -> U256 {
        self.state.lock().balances.get(&address).copied().unwrap_or_default()
    }

    pub fn owner_of(&self, token_id: U256) -> Option<Address> {
        self.state.lock().owners.get(&token_id).copied()
    }

    pub fn token_count(&self) -> usize {
        self.state.lock().owners.len()
    }

    pub fn invocations(&self, project_id: ProjectId) -> u64 {
        self.state.lock().projects.get(&project_id).map_or(0, |p| p.invocations)
    }

    /// Number of open checkpoints.
    pub fn snapshot_depth(&self) -> usize {
        self.snapshots.lock().len()
    }

    fn with_project<T>(
        &self,
        project_id: ProjectId,
        f: impl FnOnce(&MemoryProject) -> T,
    ) -> Result<T, LedgerError> {
        self.state
            .lock()
            .projects
            .get(&project_id)
            .map(f)
            .ok_or(LedgerError::UnknownProject(project_id))
    }
}

impl Ledger for MemoryHost {
    fn is_whitelisted(&self, caller: Address) -> bool {
        self.state.lock().whitelisted.contains(&caller)
    }

    fn artist_of_project(&self, project_id: ProjectId) -> Result<Address, LedgerError> {
        self.with_project(project_id, |p| p.artist)
    }

    fn mint(
        &self,
        to: Address,
        project_id: ProjectId,
        _payer: Address,
    ) -> Result<U256, LedgerError> {
        let mut state = self.state.lock();
        let project =
            state.projects.get_mut(&project_id).ok_or(LedgerError::UnknownProject(project_id))?;
        if project.max_invocations > 0 && project.invocations >= project.max_invocations {
            return Err(LedgerError::MintRejected("must not exceed max invocations".to_string()));
        }
        let token_id = token_id_for(project_id, project.invocations);
        project.invocations += 1;
        state.owners.insert(token_id, to);
        Ok(token_id)
    }

    fn project_invocations(
        &self,
        project_id: ProjectId,
    ) -> Result<ProjectInvocations, LedgerError> {
        self.with_project(project_id, |p| ProjectInvocations {
            invocations: p.invocations,
            max_invocations: p.max_invocations,
        })
    }

    fn platform_percentage(&self) -> u8 {
        self.state.lock().platform_percentage
    }

    fn platform_address(&self) -> Address {
        self.state.lock().platform
    }

    fn secondary_payee_percentage(&self, project_id: ProjectId) -> Result<u8, LedgerError> {
        self.with_project(project_id, |p| p.secondary_payee_percentage)
    }

    fn secondary_payee_address(&self, project_id: ProjectId) -> Result<Address, LedgerError> {
        self.with_project(project_id, |p| p.secondary_payee)
    }
}

impl ValueTransfer for MemoryHost {
    fn send(&self, to: Address, amount: U256) -> bool {
        // no lock may be held while the hook runs, it can call back into the minter
        let hook = self.send_hook.read().clone();
        if let Some(hook) = hook {
            if !hook(to, amount) {
                return false;
            }
        }

        let mut state = self.state.lock();
        if state.rejecting.contains(&to) {
            return false;
        }
        let balance = state.balances.entry(to).or_default();
        *balance += amount;
        true
    }
}

impl Journal for MemoryHost {
    fn checkpoint(&self) -> JournalCheckpoint {
        let snapshot = self.state.lock().clone();
        let mut snapshots = self.snapshots.lock();
        snapshots.push(snapshot);
        JournalCheckpoint(snapshots.len() - 1)
    }

    fn commit(&self, checkpoint: JournalCheckpoint) {
        self.snapshots.lock().truncate(checkpoint.0);
    }

    fn revert(&self, checkpoint: JournalCheckpoint) {
        let restored = self.snapshots.lock().drain(checkpoint.0..).next();
        if let Some(restored) = restored {
            *self.state.lock() = restored;
        }
    }
}
