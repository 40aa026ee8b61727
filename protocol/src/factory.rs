//! # Vault Factory
//!
//! The [`VaultFactory`] is the sole creation path for vaults. It derives
//! each vault's identity deterministically from the creation parameters
//! — factory identity, creator, purpose, duration, and a caller-chosen
//! salt — so the identity is predictable *before* the vault exists via
//! [`VaultFactory::predict_vault_id`], and the same parameters can never
//! register twice.
//!
//! Creation also pins the vault's roles: the creator becomes the owner,
//! and the factory's developer account (fixed at factory construction)
//! becomes the penalty beneficiary of every vault it creates.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::clock::Clock;
use crate::events::FactoryEvent;
use crate::identity::{AccountId, VaultId};
use crate::vault::{SavingsVault, VaultConfig};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from factory operations.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// A vault with this exact parameter set (and salt) already exists.
    /// Re-creating it would alias two lifecycles onto one identity.
    #[error("vault {vault} already exists")]
    DuplicateVault {
        /// The identity both creations derive to.
        vault: VaultId,
    },
}

// ---------------------------------------------------------------------------
// VaultFactory
// ---------------------------------------------------------------------------

/// Creates, registers, and serves [`SavingsVault`]s.
///
/// The registry owns its vaults; callers operate on them through
/// [`vault`](VaultFactory::vault) / [`vault_mut`](VaultFactory::vault_mut)
/// lookups by identity.
pub struct VaultFactory {
    id: AccountId,
    developer: AccountId,
    clock: Arc<dyn Clock>,
    /// Registry of every vault this factory has created.
    vaults: HashMap<VaultId, SavingsVault>,
    /// Creation order, for stable enumeration.
    order: Vec<VaultId>,
    events: Vec<FactoryEvent>,
}

impl VaultFactory {
    /// Creates a factory with its own identity, the developer account
    /// that will receive early-withdrawal penalties from every vault it
    /// creates, and the clock its vaults will read.
    pub fn new(id: AccountId, developer: AccountId, clock: Arc<dyn Clock>) -> Self {
        Self {
            id,
            developer,
            clock,
            vaults: HashMap::new(),
            order: Vec::new(),
            events: Vec::new(),
        }
    }

    /// The factory's own identity — the first field of every vault
    /// identity it derives.
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// The penalty beneficiary pinned into every vault.
    pub fn developer(&self) -> &AccountId {
        &self.developer
    }

    /// Computes the identity a [`create_vault`](Self::create_vault) call
    /// with these parameters would produce, without creating anything.
    ///
    /// Pure and side-effect free; the answer holds whether or not the
    /// vault ever gets created.
    pub fn predict_vault_id(
        &self,
        creator: &AccountId,
        purpose: &str,
        duration: u64,
        salt: &[u8; 32],
    ) -> VaultId {
        VaultId::derive(&self.id, creator, purpose, duration, salt)
    }

    /// Creates a vault owned by `creator`, locked for `duration` seconds
    /// starting now.
    ///
    /// The returned identity always equals what
    /// [`predict_vault_id`](Self::predict_vault_id) gave for the same
    /// parameters. The salt is what lets one creator run several vaults
    /// with an otherwise identical purpose and duration.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::DuplicateVault`] if this exact parameter
    /// set has been used before; the registry is left unchanged.
    pub fn create_vault(
        &mut self,
        creator: &AccountId,
        purpose: &str,
        duration: u64,
        salt: &[u8; 32],
    ) -> Result<VaultId, FactoryError> {
        let id = self.predict_vault_id(creator, purpose, duration, salt);
        if self.vaults.contains_key(&id) {
            return Err(FactoryError::DuplicateVault { vault: id });
        }

        let start_time = self.clock.now();
        let vault = SavingsVault::new(
            id,
            VaultConfig {
                owner: *creator,
                developer: self.developer,
                purpose: purpose.to_string(),
                duration,
                start_time,
            },
            self.clock.clone(),
        );

        self.vaults.insert(id, vault);
        self.order.push(id);
        self.events.push(FactoryEvent::VaultCreated {
            vault: id,
            owner: *creator,
            purpose: purpose.to_string(),
            duration,
        });

        tracing::info!(
            vault = %id,
            owner = %creator,
            purpose,
            duration,
            start_time,
            "vault created"
        );

        Ok(id)
    }

    /// Looks up a vault by identity.
    pub fn vault(&self, id: &VaultId) -> Option<&SavingsVault> {
        self.vaults.get(id)
    }

    /// Looks up a vault by identity, mutably — for deposits and
    /// withdrawals.
    pub fn vault_mut(&mut self, id: &VaultId) -> Option<&mut SavingsVault> {
        self.vaults.get_mut(id)
    }

    /// Every vault identity this factory has created, in creation order.
    pub fn vault_ids(&self) -> &[VaultId] {
        &self.order
    }

    /// How many vaults this factory has created.
    pub fn vault_count(&self) -> usize {
        self.order.len()
    }

    /// Everything this factory has emitted, in order.
    pub fn events(&self) -> &[FactoryEvent] {
        &self.events
    }
}

impl std::fmt::Debug for VaultFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultFactory")
            .field("id", &self.id)
            .field("developer", &self.developer)
            .field("vault_count", &self.order.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const START: u64 = 1_700_000_000;

    fn factory() -> (VaultFactory, Arc<ManualClock>) {
        let clock = ManualClock::shared(START);
        let factory = VaultFactory::new(
            AccountId::from_seed(b"factory"),
            AccountId::from_seed(b"developer"),
            clock.clone(),
        );
        (factory, clock)
    }

    #[test]
    fn prediction_equals_creation() {
        let (mut factory, _clock) = factory();
        let creator = AccountId::from_seed(b"creator");
        let salt = [7u8; 32];

        let predicted = factory.predict_vault_id(&creator, "Buy a new laptop", 2_592_000, &salt);
        let created = factory
            .create_vault(&creator, "Buy a new laptop", 2_592_000, &salt)
            .unwrap();

        assert_eq!(predicted, created);
        assert!(factory.vault(&created).is_some());
    }

    #[test]
    fn prediction_is_side_effect_free() {
        let (factory, _clock) = factory();
        let creator = AccountId::from_seed(b"creator");
        factory.predict_vault_id(&creator, "Vacation", 1_000, &[0u8; 32]);
        assert_eq!(factory.vault_count(), 0);
    }

    #[test]
    fn created_vault_carries_creation_parameters() {
        let (mut factory, _clock) = factory();
        let creator = AccountId::from_seed(b"creator");
        let id = factory
            .create_vault(&creator, "Emergency fund", 604_800, &[1u8; 32])
            .unwrap();

        let vault = factory.vault(&id).unwrap();
        assert_eq!(vault.owner(), &creator);
        assert_eq!(vault.developer(), factory.developer());
        assert_eq!(vault.saving_purpose(), "Emergency fund");
        assert_eq!(vault.saving_duration(), 604_800);
        assert_eq!(vault.start_time(), START);
    }

    #[test]
    fn duplicate_parameters_rejected() {
        let (mut factory, _clock) = factory();
        let creator = AccountId::from_seed(b"creator");
        let salt = [2u8; 32];
        factory
            .create_vault(&creator, "Rainy day", 100, &salt)
            .unwrap();

        let err = factory
            .create_vault(&creator, "Rainy day", 100, &salt)
            .unwrap_err();
        assert!(matches!(err, FactoryError::DuplicateVault { .. }));
        assert_eq!(factory.vault_count(), 1);
    }

    #[test]
    fn duplicate_rejected_even_after_time_passes() {
        // start_time is not part of the identity, so a later retry with
        // the same parameters still collides.
        let (mut factory, clock) = factory();
        let creator = AccountId::from_seed(b"creator");
        let salt = [3u8; 32];
        factory
            .create_vault(&creator, "Rainy day", 100, &salt)
            .unwrap();

        clock.advance(10_000);
        let err = factory
            .create_vault(&creator, "Rainy day", 100, &salt)
            .unwrap_err();
        assert!(matches!(err, FactoryError::DuplicateVault { .. }));
    }

    #[test]
    fn salt_disambiguates_identical_parameters() {
        let (mut factory, _clock) = factory();
        let creator = AccountId::from_seed(b"creator");

        let a = factory
            .create_vault(&creator, "Rainy day", 100, &[0u8; 32])
            .unwrap();
        let b = factory
            .create_vault(&creator, "Rainy day", 100, &[1u8; 32])
            .unwrap();

        assert_ne!(a, b);
        assert_eq!(factory.vault_count(), 2);
    }

    #[test]
    fn vault_ids_preserve_creation_order() {
        let (mut factory, _clock) = factory();
        let creator = AccountId::from_seed(b"creator");
        let a = factory
            .create_vault(&creator, "First", 100, &[0u8; 32])
            .unwrap();
        let b = factory
            .create_vault(&creator, "Second", 100, &[0u8; 32])
            .unwrap();

        assert_eq!(factory.vault_ids(), &[a, b]);
    }

    #[test]
    fn creation_emits_event() {
        let (mut factory, _clock) = factory();
        let creator = AccountId::from_seed(b"creator");
        let id = factory
            .create_vault(&creator, "Buy a new laptop", 2_592_000, &[0u8; 32])
            .unwrap();

        assert_eq!(
            factory.events(),
            &[FactoryEvent::VaultCreated {
                vault: id,
                owner: creator,
                purpose: "Buy a new laptop".to_string(),
                duration: 2_592_000,
            }]
        );
    }

    #[test]
    fn different_factories_derive_different_identities() {
        let clock = ManualClock::shared(START);
        let developer = AccountId::from_seed(b"developer");
        let f1 = VaultFactory::new(AccountId::from_seed(b"f1"), developer, clock.clone());
        let f2 = VaultFactory::new(AccountId::from_seed(b"f2"), developer, clock);

        let creator = AccountId::from_seed(b"creator");
        let salt = [0u8; 32];
        assert_ne!(
            f1.predict_vault_id(&creator, "Same", 100, &salt),
            f2.predict_vault_id(&creator, "Same", 100, &salt)
        );
    }

    #[test]
    fn unknown_vault_lookup_is_none() {
        let (factory, _clock) = factory();
        assert!(factory.vault(&VaultId::from_bytes([0xAB; 32])).is_none());
    }
}
