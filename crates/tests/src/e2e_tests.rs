use std::sync::Arc;

use alloy_primitives::{Address, U256};
use artmint_bytecode_storage::{
    PayloadStore, PurgeError, ReadError, StoreConfig, HEADER_LEN, PURGE_SIGNAL,
};
use artmint_common::{invocation_of, project_of};
use artmint_minter::{
    test_utils::MemoryHost, AdmissionError, AllowlistMinter, MinterConfig, MinterError,
    ProjectPhase, TransferFailure,
};
use artmint_splits::SplitLeg;
use eyre::{ensure, Result};
use parking_lot::Mutex;
use serde_json::json;

use crate::common::*;

fn wei(value: u64) -> U256 {
    U256::from(value)
}

#[test]
fn test_e2e_allowlist_proofs_verify_and_reject_mutations() -> Result<()> {
    let fx = MintFixture::new(Fees::default())?;
    let root = fx.minter.project_config(TEST_PROJECT_ID).merkle_root;

    for who in buyers() {
        let proof = fx.proof(who)?;
        assert!(fx.minter.verify_address(TEST_PROJECT_ID, &proof, who));
        assert_eq!(AllowlistMinter::<MemoryHost>::process_proof_for_address(&proof, who), root);
    }

    let who = buyer(17);
    let proof = fx.proof(who)?;
    for (i, _) in proof.iter().enumerate() {
        let mut mutated = proof.clone();
        mutated[i].0[31] ^= 0x01;
        assert!(!fx.minter.verify_address(TEST_PROJECT_ID, &mutated, who));
    }
    let mut flipped = who;
    flipped.0[0] ^= 0x80;
    assert!(!fx.minter.verify_address(TEST_PROJECT_ID, &proof, flipped));
    assert!(!fx.minter.verify_address(TEST_PROJECT_ID, &proof, OUTSIDER));

    assert_eq!(
        fx.minter.mint(OUTSIDER, TEST_PROJECT_ID, &proof, wei(1_000)),
        Err(AdmissionError::InvalidProof { project_id: TEST_PROJECT_ID, address: OUTSIDER }.into())
    );
    Ok(())
}

#[test]
fn test_e2e_one_mint_per_address() -> Result<()> {
    let fx = MintFixture::new(Fees::default())?;
    let who = buyer(0);

    fx.mint(who, wei(1_000))?;
    let second = fx.minter.mint(who, TEST_PROJECT_ID, &fx.proof(who)?, wei(1_000));
    assert_eq!(
        second,
        Err(AdmissionError::AlreadyMinted { project_id: TEST_PROJECT_ID, address: who }.into())
    );
    assert_eq!(fx.host.token_count(), 1);

    fx.minter.set_mint_limiter_enabled(ARTIST, TEST_PROJECT_ID, false)?;
    fx.mint(who, wei(1_000))?;
    fx.mint(who, wei(1_000))?;
    assert_eq!(fx.host.token_count(), 3);
    Ok(())
}

#[test]
fn test_e2e_zero_ceiling_never_reaches_max() -> Result<()> {
    let fx = MintFixture::new(Fees { price: U256::ZERO, ..Default::default() })?;
    fx.set_ceiling(0)?;

    for i in 0..50 {
        let token_id = fx.mint(buyer(i), U256::ZERO)?;
        assert_eq!(project_of(token_id), Some(TEST_PROJECT_ID));
        assert_eq!(invocation_of(token_id), i);
        assert!(!fx.minter.project_config(TEST_PROJECT_ID).max_has_been_invoked);
    }
    assert_eq!(fx.host.invocations(TEST_PROJECT_ID), 50);
    assert_eq!(fx.minter.project_phase(TEST_PROJECT_ID), ProjectPhase::Active);
    Ok(())
}

#[test]
fn test_e2e_ceiling_reached_exactly_at_nth_mint() -> Result<()> {
    const CEILING: u64 = 5;
    let fx = MintFixture::new(Fees::default())?;
    fx.set_ceiling(CEILING)?;

    for i in 0..CEILING {
        let phase = fx.minter.project_phase(TEST_PROJECT_ID);
        assert_eq!(phase, ProjectPhase::Active, "before mint {i}");
        fx.mint(buyer(i), wei(1_000))?;
    }
    assert_eq!(fx.minter.project_phase(TEST_PROJECT_ID), ProjectPhase::MaxReached);

    let late = buyer(CEILING);
    assert_eq!(
        fx.minter.mint(late, TEST_PROJECT_ID, &fx.proof(late)?, wei(1_000)),
        Err(AdmissionError::MaxInvocationsReached { project_id: TEST_PROJECT_ID }.into())
    );
    assert_eq!(fx.host.invocations(TEST_PROJECT_ID), CEILING);
    assert_eq!(fx.host.balance_of(late), U256::ZERO);
    Ok(())
}

#[test]
fn test_e2e_funds_are_conserved() -> Result<()> {
    let prices = [0u64, 1, 7, 99, 100, 101, 1_000, 123_457];
    let percentages = [(0u8, 0u8), (10, 0), (10, 20), (5, 50), (33, 33), (100, 0), (0, 100)];
    let overpayments = [0u64, 1, 500];

    for price in prices {
        for (platform_percentage, secondary_payee_percentage) in percentages {
            for over in overpayments {
                let fx = MintFixture::new(Fees {
                    price: wei(price),
                    platform_percentage,
                    secondary_payee_percentage,
                })?;
                let who = buyer(1);
                let payment = wei(price + over);
                fx.mint(who, payment)?;

                let refund = fx.host.balance_of(who);
                let platform = fx.host.balance_of(PLATFORM);
                let payee = fx.host.balance_of(SECONDARY_PAYEE);
                let artist = fx.host.balance_of(ARTIST);

                let case = format!(
                    "price {price}, pcts {platform_percentage}/{secondary_payee_percentage}, \
                     over {over}"
                );
                ensure!(refund + platform + payee + artist == payment, "payment leaked: {case}");
                ensure!(platform + payee + artist == wei(price), "proceeds != price: {case}");
                ensure!(refund == wei(over), "wrong refund: {case}");
                ensure!(
                    platform == wei(price * u64::from(platform_percentage) / 100),
                    "platform share floors: {case}"
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_e2e_platform_transfer_failure_rolls_back_mint() -> Result<()> {
    let fx = MintFixture::new(Fees { secondary_payee_percentage: 25, ..Default::default() })?;
    let who = buyer(2);
    fx.host.reject_transfers_to(PLATFORM);

    let result = fx.minter.mint(who, TEST_PROJECT_ID, &fx.proof(who)?, wei(1_200));
    assert_eq!(
        result,
        Err(MinterError::Transfer(TransferFailure {
            leg: SplitLeg::Platform,
            to: PLATFORM,
            amount: wei(100),
        }))
    );

    assert_eq!(fx.host.token_count(), 0);
    assert_eq!(fx.host.invocations(TEST_PROJECT_ID), 0);
    assert!(!fx.minter.has_minted(TEST_PROJECT_ID, who));
    // the refund leg already ran and was unwound as well
    assert_eq!(fx.host.balance_of(who), U256::ZERO);
    assert_eq!(fx.host.snapshot_depth(), 0);

    fx.host.accept_transfers_to(PLATFORM);
    fx.mint(who, wei(1_200))?;
    assert_eq!(fx.host.balance_of(who), wei(200));
    assert_eq!(fx.host.balance_of(PLATFORM), wei(100));
    assert_eq!(fx.host.balance_of(SECONDARY_PAYEE), wei(225));
    assert_eq!(fx.host.balance_of(ARTIST), wei(675));
    Ok(())
}

#[test]
fn test_e2e_reentrant_recipient_cannot_double_mint() -> Result<()> {
    let fx = MintFixture::new(Fees::default())?;
    let who = buyer(3);
    let proof = fx.proof(who)?;
    let attempts = Arc::new(Mutex::new(Vec::new()));

    let minter = Arc::downgrade(&fx.minter);
    let sink = Arc::clone(&attempts);
    let replay = proof.clone();
    fx.host.set_send_hook(Arc::new(move |to: Address, _amount: U256| {
        if to == who {
            if let Some(minter) = minter.upgrade() {
                sink.lock().push(minter.mint(who, TEST_PROJECT_ID, &replay, wei(1_000)));
            }
        }
        true
    }));

    // overpay so the refund calls back into the buyer
    fx.minter.mint(who, TEST_PROJECT_ID, &proof, wei(1_001))?;

    let attempts = attempts.lock();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0], Err(MinterError::Reentrancy));
    assert_eq!(fx.host.token_count(), 1);
    assert!(!fx.minter.project_config(TEST_PROJECT_ID).max_has_been_invoked);
    Ok(())
}

#[test]
fn test_e2e_unconfigured_project_rejects_mints() -> Result<()> {
    let fx = MintFixture::new(Fees::default())?;
    let other_project = TEST_PROJECT_ID + 1;
    let who = buyer(4);

    assert_eq!(fx.minter.project_phase(other_project), ProjectPhase::Unconfigured);
    assert_eq!(
        fx.minter.mint(who, other_project, &fx.proof(who)?, U256::ZERO),
        Err(AdmissionError::PriceNotConfigured { project_id: other_project }.into())
    );
    assert!(!fx.minter.price_info(other_project).is_configured);
    Ok(())
}

#[test]
fn test_e2e_payload_store_lifecycle() -> Result<()> {
    let store = PayloadStore::new(StoreConfig::default());
    let writer = ARTIST;
    let script: Vec<u8> =
        b"let seed = tokenData.hash;\n".iter().copied().cycle().take(10_500).collect();

    let mut handles = Vec::new();
    for payload in [Vec::new(), vec![0x7f], script.clone()] {
        let handle = store.write(writer, &payload)?;
        assert_eq!(&store.read(handle)?[..], payload.as_slice());
        assert_eq!(store.size_of(handle), HEADER_LEN + payload.len());
        handles.push(handle);
    }
    let handle = handles[2];

    assert!(matches!(store.purge(OUTSIDER, handle), Err(PurgeError::NotCreator { .. })));
    for signal in [&[][..], &[PURGE_SIGNAL, PURGE_SIGNAL][..], &[0xFE][..], &[0x01][..]] {
        assert!(store.purge_with_signal(writer, handle, signal).is_err());
    }
    assert_eq!(&store.read(handle)?[..], script.as_slice());

    store.purge(writer, handle)?;
    assert_eq!(store.read(handle), Err(ReadError::NotFound(handle)));
    assert_eq!(store.size_of(handle), 0);
    assert_eq!(store.read(handles[1])?.len(), 1);
    Ok(())
}

#[test]
fn test_e2e_payload_update_is_write_then_purge() -> Result<()> {
    let store = PayloadStore::default();
    let writer = ARTIST;
    let old = store.write(writer, b"v1")?;
    let new = store.write(writer, b"v2")?;
    store.purge(writer, old)?;

    assert_ne!(old, new);
    assert!(!store.exists(old));
    assert_eq!(&store.read(new)?[..], b"v2");
    assert_eq!(store.creator_of(new)?, writer);
    Ok(())
}

#[test]
fn test_e2e_configs_load_from_shared_settings() -> Result<()> {
    let settings = json!({
        "allowlistMinter": { "minterType": "MinterMerkleV0", "currencySymbol": "ETH" },
        "payloadStore": { "maxObjectSize": 4096 }
    });
    let minter = MinterConfig::from_json(&settings)?;
    let store = StoreConfig::from_json(&settings)?;

    assert_eq!(minter, MinterConfig::default());
    assert_eq!(store.max_payload_size(), 4096 - HEADER_LEN);

    let fx = MintFixture::new(Fees::default())?;
    let store = PayloadStore::new(store);
    let script = vec![0x2a; 10_000];
    let handles = store.write_chunks(ARTIST, &script)?;
    assert_eq!(handles.len(), 3);
    assert_eq!(store.read_chunks(&handles)?, script);
    assert_eq!(fx.minter.minter_type(), minter.minter_type);
    Ok(())
}
