//! # Events
//!
//! Serializable records of everything externally observable: vault
//! creation, deposits, and withdrawals. Each factory and vault keeps an
//! append-only log of the events it emitted, so observers (tests, the
//! CLI, an indexer) can replay history without instrumenting the calls
//! themselves. Structured `tracing` output happens at the call sites in
//! addition to — never instead of — these records.

use serde::{Deserialize, Serialize};

use crate::asset::AssetId;
use crate::identity::{AccountId, VaultId};

/// An event emitted by a single vault.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultEvent {
    /// Funds were pulled into the vault.
    Deposited {
        /// The asset that was deposited.
        asset: AssetId,
        /// Amount deposited, in smallest units.
        amount: u64,
    },
    /// The full balance of an asset was paid out.
    Withdrawn {
        /// The asset that was withdrawn.
        asset: AssetId,
        /// Amount paid to the vault owner (net of any penalty).
        amount_to_owner: u64,
        /// `true` if the withdrawal happened before maturity and a
        /// penalty was routed to the developer beneficiary.
        was_early: bool,
    },
}

/// An event emitted by the factory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactoryEvent {
    /// A new vault was created and registered.
    VaultCreated {
        /// Identity of the new vault.
        vault: VaultId,
        /// The account that requested creation (and owns the vault).
        owner: AccountId,
        /// The vault's saving purpose label.
        purpose: String,
        /// The lock duration in seconds.
        duration: u64,
    },
}
