//! Common test fixtures for artmint tests.

use std::sync::Arc;

use alloy_primitives::{address, Address, B256, U256};
use artmint_common::ProjectId;
use artmint_minter::{
    test_utils::{MemoryHost, MemoryProject},
    AllowlistMinter, AllowlistTree,
};
use eyre::{eyre, Result};

/// Project minted in tests
pub const TEST_PROJECT_ID: ProjectId = 3;
/// Artist of the test project
pub const ARTIST: Address = address!("0x00000000000000000000000000000000000a0001");
/// Platform fee recipient
pub const PLATFORM: Address = address!("0x00000000000000000000000000000000000a0002");
/// Secondary payee of the test project
pub const SECONDARY_PAYEE: Address = address!("0x00000000000000000000000000000000000a0003");
/// Ledger-whitelisted operator allowed to sync invocations
pub const OPERATOR: Address = address!("0x00000000000000000000000000000000000a0004");
/// Address that is never on the allowlist
pub const OUTSIDER: Address = address!("0x00000000000000000000000000000000000a0005");
/// Number of allowlisted buyers
pub const BUYER_COUNT: u64 = 64;

/// Returns the `index`-th allowlisted buyer.
pub fn buyer(index: u64) -> Address {
    Address::from_word(B256::from(U256::from(0x1_0000 + index)))
}

/// Every allowlisted buyer.
pub fn buyers() -> Vec<Address> {
    (0..BUYER_COUNT).map(buyer).collect()
}

/// Fee setup of a test project.
#[derive(Debug, Clone, Copy)]
pub struct Fees {
    /// Price per token
    pub price: U256,
    /// Platform percentage
    pub platform_percentage: u8,
    /// Secondary payee percentage
    pub secondary_payee_percentage: u8,
}

impl Default for Fees {
    fn default() -> Self {
        Self { price: U256::from(1_000u64), platform_percentage: 10, secondary_payee_percentage: 0 }
    }
}

/// A configured, active project on an in-memory host.
#[derive(Debug)]
pub struct MintFixture {
    /// Journaled in-memory ledger
    pub host: Arc<MemoryHost>,
    /// Minter under test
    pub minter: Arc<AllowlistMinter<MemoryHost>>,
    /// Allowlist committed to by the project root
    pub tree: AllowlistTree,
}

impl MintFixture {
    /// Sets up [`TEST_PROJECT_ID`] with the given fees and the [`buyers`] allowlist.
    pub fn new(fees: Fees) -> Result<Self> {
        let host = Arc::new(MemoryHost::new(PLATFORM, fees.platform_percentage));
        host.whitelist(OPERATOR);
        host.add_project(
            TEST_PROJECT_ID,
            MemoryProject {
                artist: ARTIST,
                secondary_payee: SECONDARY_PAYEE,
                secondary_payee_percentage: fees.secondary_payee_percentage,
                ..Default::default()
            },
        );

        let minter = Arc::new(AllowlistMinter::with_host(Arc::clone(&host)));
        let tree = AllowlistTree::from_addresses(buyers());
        minter.update_merkle_root(ARTIST, TEST_PROJECT_ID, tree.root())?;
        minter.update_price_per_token(ARTIST, TEST_PROJECT_ID, fees.price)?;

        Ok(Self { host, minter, tree })
    }

    /// Proof for an allowlisted address.
    pub fn proof(&self, who: Address) -> Result<Vec<B256>> {
        self.tree.proof(who).ok_or_else(|| eyre!("{who} is not allowlisted"))
    }

    /// Sets the ledger ceiling and syncs it into the minter.
    pub fn set_ceiling(&self, max_invocations: u64) -> Result<()> {
        self.host.set_max_invocations(TEST_PROJECT_ID, max_invocations);
        self.minter.sync_max_invocations(OPERATOR, TEST_PROJECT_ID)?;
        Ok(())
    }

    /// Mints one token to `who` paying `value`.
    pub fn mint(&self, who: Address, value: U256) -> Result<U256> {
        let proof = self.proof(who)?;
        Ok(self.minter.mint(who, TEST_PROJECT_ID, &proof, value)?)
    }
}
