//! End-to-end integration tests for the GrowVault protocol.
//!
//! These tests exercise the full savings lifecycle through the public
//! API only: factory construction, identity prediction, vault creation,
//! allowance-based deposits, clock travel, and both withdrawal paths.
//! They prove that the components compose the way a deployment would
//! use them.
//!
//! Each test stands alone with its own ledger, clock, and factory.
//! No shared state, no test ordering dependencies, no flaky failures.

use std::sync::Arc;

use growvault_protocol::asset::{AssetId, AssetLedger, InMemoryLedger};
use growvault_protocol::clock::ManualClock;
use growvault_protocol::events::FactoryEvent;
use growvault_protocol::factory::VaultFactory;
use growvault_protocol::identity::AccountId;
use growvault_protocol::vault::VaultError;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const START: u64 = 1_700_000_000;
const THIRTY_DAYS: u64 = 2_592_000;

struct World {
    factory: VaultFactory,
    ledger: InMemoryLedger,
    clock: Arc<ManualClock>,
    asset: AssetId,
    alice: AccountId,
    developer: AccountId,
}

/// Spins up a factory, a funded depositor, and a mock stablecoin.
fn setup() -> World {
    let clock = ManualClock::shared(START);
    let developer = AccountId::from_seed(b"growvault-developer");
    let alice = AccountId::from_seed(b"alice");
    let asset = AssetId::derive("Mock USDT", "USDT", &AccountId::from_seed(b"issuer"));

    let factory = VaultFactory::new(
        AccountId::from_seed(b"growvault-factory"),
        developer,
        clock.clone(),
    );

    let mut ledger = InMemoryLedger::new();
    ledger.mint(&asset, &alice, 1_000_000).expect("mint fixture");

    World {
        factory,
        ledger,
        clock,
        asset,
        alice,
        developer,
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn matured_savings_pay_out_in_full() {
    let mut w = setup();
    let salt = [0u8; 32];

    let predicted = w
        .factory
        .predict_vault_id(&w.alice, "Buy a new laptop", THIRTY_DAYS, &salt);
    let vault_id = w
        .factory
        .create_vault(&w.alice, "Buy a new laptop", THIRTY_DAYS, &salt)
        .expect("create vault");
    assert_eq!(predicted, vault_id);

    let vault = w.factory.vault_mut(&vault_id).expect("registered");
    assert_eq!(vault.saving_purpose(), "Buy a new laptop");
    assert_eq!(vault.saving_duration(), THIRTY_DAYS);
    assert_eq!(vault.start_time(), START);

    w.ledger.approve(&w.asset, &w.alice, &vault.account(), 100);
    vault
        .deposit(&mut w.ledger, &w.alice, w.asset, 100)
        .expect("deposit");
    assert_eq!(vault.get_balance(&w.asset), 100);

    // Travel past maturity and settle.
    w.clock.advance(THIRTY_DAYS + 1);
    let outcome = vault.withdraw(&mut w.ledger, &w.asset).expect("withdraw");

    assert!(!outcome.was_early);
    assert_eq!(outcome.amount_to_owner, 100);
    assert_eq!(outcome.penalty, 0);
    assert_eq!(w.ledger.balance_of(&w.asset, &w.alice), 1_000_000);
    assert_eq!(w.ledger.balance_of(&w.asset, &w.developer), 0);
}

#[test]
fn early_exit_costs_fifteen_percent() {
    let mut w = setup();

    let vault_id = w
        .factory
        .create_vault(&w.alice, "Buy a new laptop", THIRTY_DAYS, &[0u8; 32])
        .expect("create vault");

    let vault = w.factory.vault_mut(&vault_id).expect("registered");
    w.ledger.approve(&w.asset, &w.alice, &vault.account(), 100);
    vault
        .deposit(&mut w.ledger, &w.alice, w.asset, 100)
        .expect("deposit");

    // No time travel: still inside the lock.
    let outcome = vault.withdraw(&mut w.ledger, &w.asset).expect("withdraw");

    assert!(outcome.was_early);
    assert_eq!(outcome.amount_to_owner, 85);
    assert_eq!(outcome.penalty, 15);
    assert_eq!(w.ledger.balance_of(&w.asset, &w.alice), 999_985);
    assert_eq!(w.ledger.balance_of(&w.asset, &w.developer), 15);
}

#[test]
fn vault_funds_are_conserved_across_the_lifecycle() {
    let mut w = setup();
    let vault_id = w
        .factory
        .create_vault(&w.alice, "Emergency fund", 604_800, &[5u8; 32])
        .expect("create vault");

    let vault = w.factory.vault_mut(&vault_id).expect("registered");
    let custody = vault.account();
    w.ledger.approve(&w.asset, &w.alice, &custody, 12_345);
    vault
        .deposit(&mut w.ledger, &w.alice, w.asset, 12_345)
        .expect("deposit");

    let outcome = vault.withdraw(&mut w.ledger, &w.asset).expect("withdraw");

    // Everything that left the depositor is accounted for exactly.
    let total = w.ledger.balance_of(&w.asset, &w.alice)
        + w.ledger.balance_of(&w.asset, &w.developer)
        + w.ledger.balance_of(&w.asset, &custody);
    assert_eq!(total, 1_000_000);
    assert_eq!(outcome.amount_to_owner + outcome.penalty, 12_345);
    assert_eq!(w.ledger.balance_of(&w.asset, &custody), 0);
}

#[test]
fn several_vaults_run_independently() {
    let mut w = setup();
    let laptop = w
        .factory
        .create_vault(&w.alice, "Buy a new laptop", THIRTY_DAYS, &[0u8; 32])
        .expect("create laptop vault");
    let vacation = w
        .factory
        .create_vault(&w.alice, "Vacation", THIRTY_DAYS * 6, &[0u8; 32])
        .expect("create vacation vault");
    assert_ne!(laptop, vacation);
    assert_eq!(w.factory.vault_ids(), &[laptop, vacation]);

    for id in [laptop, vacation] {
        let vault = w.factory.vault_mut(&id).expect("registered");
        w.ledger.approve(&w.asset, &w.alice, &vault.account(), 500);
        vault
            .deposit(&mut w.ledger, &w.alice, w.asset, 500)
            .expect("deposit");
    }

    // The laptop vault matures; the vacation vault does not.
    w.clock.advance(THIRTY_DAYS);

    let laptop_outcome = {
        let vault = w.factory.vault_mut(&laptop).expect("registered");
        vault.withdraw(&mut w.ledger, &w.asset).expect("withdraw")
    };
    let vacation_outcome = {
        let vault = w.factory.vault_mut(&vacation).expect("registered");
        vault.withdraw(&mut w.ledger, &w.asset).expect("withdraw")
    };

    assert!(!laptop_outcome.was_early);
    assert_eq!(laptop_outcome.amount_to_owner, 500);
    assert!(vacation_outcome.was_early);
    assert_eq!(vacation_outcome.amount_to_owner, 425);
    assert_eq!(vacation_outcome.penalty, 75);
}

#[test]
fn factory_events_record_creations() {
    let mut w = setup();
    let vault_id = w
        .factory
        .create_vault(&w.alice, "Rainy day", 100, &[0u8; 32])
        .expect("create vault");

    assert_eq!(
        w.factory.events(),
        &[FactoryEvent::VaultCreated {
            vault: vault_id,
            owner: w.alice,
            purpose: "Rainy day".to_string(),
            duration: 100,
        }]
    );
}

#[test]
fn emptied_vault_rejects_a_second_settlement() {
    let mut w = setup();
    let vault_id = w
        .factory
        .create_vault(&w.alice, "Rainy day", 100, &[0u8; 32])
        .expect("create vault");

    let vault = w.factory.vault_mut(&vault_id).expect("registered");
    w.ledger.approve(&w.asset, &w.alice, &vault.account(), 100);
    vault
        .deposit(&mut w.ledger, &w.alice, w.asset, 100)
        .expect("deposit");
    vault.withdraw(&mut w.ledger, &w.asset).expect("first");

    let err = vault.withdraw(&mut w.ledger, &w.asset).unwrap_err();
    assert!(matches!(err, VaultError::NothingToWithdraw { .. }));
}
