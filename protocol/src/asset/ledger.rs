//! # Asset Ledger Boundary
//!
//! The vault never implements a token; it moves balances through
//! whatever [`AssetLedger`] the caller hands it. This trait is the
//! entire contract between GrowVault and the asset layer: a pull
//! (allowance-based `transfer_from`), a push (`transfer` of one's own
//! funds), and a balance query.
//!
//! Any [`LedgerError`] is fatal to the enclosing vault operation —
//! there is no retry or partial application at this layer.

use thiserror::Error;

use super::token::AssetId;
use crate::identity::AccountId;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors an asset ledger can return.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The holder does not have enough of the asset.
    #[error("insufficient balance: {holder} holds {available}, requested {requested} (asset {asset})")]
    InsufficientBalance {
        /// The asset being moved.
        asset: AssetId,
        /// The account whose balance fell short.
        holder: AccountId,
        /// The current balance.
        available: u64,
        /// The amount that was requested.
        requested: u64,
    },

    /// The spender's allowance from the holder does not cover the pull.
    #[error(
        "insufficient allowance: {spender} allowed {available} by {holder}, requested {requested}"
    )]
    InsufficientAllowance {
        /// The asset being pulled.
        asset: AssetId,
        /// The account funds are being pulled from.
        holder: AccountId,
        /// The account doing the pulling.
        spender: AccountId,
        /// The remaining allowance.
        available: u64,
        /// The amount that was requested.
        requested: u64,
    },

    /// Arithmetic overflow while crediting the recipient.
    #[error("balance overflow: {holder} at {current}, credit {credit} (asset {asset})")]
    Overflow {
        /// The asset being credited.
        asset: AssetId,
        /// The account whose balance would overflow.
        holder: AccountId,
        /// The balance before the failed credit.
        current: u64,
        /// The amount that caused the overflow.
        credit: u64,
    },
}

// ---------------------------------------------------------------------------
// AssetLedger
// ---------------------------------------------------------------------------

/// A fungible, transferable balance store for any number of assets.
///
/// Implementations must be all-or-nothing per call: a returned error
/// means no balance or allowance changed. The vault relies on this to
/// keep its own book-keeping consistent with the ledger.
pub trait AssetLedger {
    /// Pulls `amount` of `asset` from `from` into `to`, spending the
    /// allowance `from` granted to `spender`.
    ///
    /// `spender` is the identity executing the pull — for vault deposits
    /// that is the vault's own account, mirroring how a token contract
    /// sees the vault as the caller of `transferFrom`.
    fn transfer_from(
        &mut self,
        spender: &AccountId,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError>;

    /// Moves `amount` of `asset` out of `from`'s own balance into `to`.
    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError>;

    /// Returns `who`'s balance of `asset`. Unknown accounts hold zero.
    fn balance_of(&self, asset: &AssetId, who: &AccountId) -> u64;
}
