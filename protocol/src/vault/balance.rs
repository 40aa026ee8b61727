//! # Per-Asset Balance Book
//!
//! A [`BalanceBook`] tracks how much of each asset a vault has taken
//! custody of. Entries are created lazily on first deposit; an absent
//! entry is a zero balance. The invariant the book enforces is the
//! accounting one from the withdrawal state machine: a balance only ever
//! grows via [`credit`](BalanceBook::credit) and only ever reaches zero
//! via a one-shot [`drain`](BalanceBook::drain) — there is no partial
//! debit anywhere in this protocol.
//!
//! [`restore`](BalanceBook::restore) exists solely as the rollback
//! primitive for failed withdrawals: drain first, pay out, and if a
//! payout fails put the drained amount back so the operation is
//! observably all-or-nothing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::asset::AssetId;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from balance book-keeping.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// Arithmetic overflow during a credit.
    ///
    /// If you're hitting this, someone deposited their way past
    /// 18.4 quintillion smallest units. That's a bug or an attack.
    #[error("balance overflow: current {current}, credit {credit} (asset {asset})")]
    Overflow {
        /// The asset being credited.
        asset: AssetId,
        /// The balance before the failed credit.
        current: u64,
        /// The amount that caused the overflow.
        credit: u64,
    },
}

// ---------------------------------------------------------------------------
// BalanceBook
// ---------------------------------------------------------------------------

/// The set of per-asset balances held by a single vault.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BalanceBook {
    /// Balances indexed by asset, hex-keyed in human-readable form.
    #[serde(with = "crate::asset::token::asset_id_map")]
    balances: HashMap<AssetId, u64>,
}

impl BalanceBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the balance for an asset. Absent entries are zero.
    pub fn get(&self, asset: &AssetId) -> u64 {
        self.balances.get(asset).copied().unwrap_or(0)
    }

    /// Credits `amount` to an asset, creating the entry if needed.
    ///
    /// Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::Overflow`] if the credit would exceed
    /// `u64::MAX`; the book is left unchanged.
    pub fn credit(&mut self, asset: AssetId, amount: u64) -> Result<u64, BalanceError> {
        let balance = self.balances.entry(asset).or_insert(0);
        let new_balance = balance.checked_add(amount).ok_or(BalanceError::Overflow {
            asset,
            current: *balance,
            credit: amount,
        })?;
        *balance = new_balance;
        Ok(new_balance)
    }

    /// Would a credit of `amount` succeed? Used to validate a deposit
    /// before any external transfer is attempted.
    pub fn can_credit(&self, asset: &AssetId, amount: u64) -> bool {
        self.get(asset).checked_add(amount).is_some()
    }

    /// Zeroes an asset's balance and returns what was there.
    ///
    /// Draining before invoking any external transfer is what makes a
    /// reentrant withdrawal observe an empty balance.
    pub fn drain(&mut self, asset: &AssetId) -> u64 {
        self.balances.remove(asset).unwrap_or(0)
    }

    /// Puts a previously drained amount back. Rollback path only.
    pub fn restore(&mut self, asset: AssetId, amount: u64) {
        if amount > 0 {
            self.balances.insert(asset, amount);
        }
    }

    /// Returns all non-zero balances as `(AssetId, amount)` pairs.
    pub fn non_zero(&self) -> Vec<(AssetId, u64)> {
        self.balances
            .iter()
            .filter(|(_, amount)| **amount > 0)
            .map(|(asset, amount)| (*asset, *amount))
            .collect()
    }

    /// Returns `true` if no asset currently has a non-zero balance.
    pub fn is_empty(&self) -> bool {
        self.balances.values().all(|amount| *amount == 0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::AccountId;

    fn asset(tag: &[u8]) -> AssetId {
        AssetId::derive("Mock", "MCK", &AccountId::from_seed(tag))
    }

    #[test]
    fn absent_entry_is_zero() {
        let book = BalanceBook::new();
        assert_eq!(book.get(&asset(b"a")), 0);
        assert!(book.is_empty());
    }

    #[test]
    fn credit_accumulates() {
        let mut book = BalanceBook::new();
        let a = asset(b"a");
        assert_eq!(book.credit(a, 500).unwrap(), 500);
        assert_eq!(book.credit(a, 300).unwrap(), 800);
        assert_eq!(book.get(&a), 800);
    }

    #[test]
    fn credit_overflow_rejected_and_unchanged() {
        let mut book = BalanceBook::new();
        let a = asset(b"a");
        book.credit(a, u64::MAX).unwrap();
        let err = book.credit(a, 1).unwrap_err();
        assert!(matches!(err, BalanceError::Overflow { .. }));
        assert_eq!(book.get(&a), u64::MAX);
    }

    #[test]
    fn can_credit_mirrors_credit() {
        let mut book = BalanceBook::new();
        let a = asset(b"a");
        assert!(book.can_credit(&a, u64::MAX));
        book.credit(a, u64::MAX).unwrap();
        assert!(!book.can_credit(&a, 1));
        assert!(book.can_credit(&a, 0));
    }

    #[test]
    fn drain_is_one_shot() {
        let mut book = BalanceBook::new();
        let a = asset(b"a");
        book.credit(a, 1_000).unwrap();

        assert_eq!(book.drain(&a), 1_000);
        assert_eq!(book.get(&a), 0);
        // A second drain finds nothing.
        assert_eq!(book.drain(&a), 0);
    }

    #[test]
    fn restore_reverses_drain() {
        let mut book = BalanceBook::new();
        let a = asset(b"a");
        book.credit(a, 750).unwrap();
        let drained = book.drain(&a);
        book.restore(a, drained);
        assert_eq!(book.get(&a), 750);
    }

    #[test]
    fn drained_asset_accepts_fresh_deposits() {
        let mut book = BalanceBook::new();
        let a = asset(b"a");
        book.credit(a, 100).unwrap();
        book.drain(&a);
        assert_eq!(book.credit(a, 40).unwrap(), 40);
    }

    #[test]
    fn non_zero_lists_only_live_balances() {
        let mut book = BalanceBook::new();
        let a = asset(b"a");
        let b = asset(b"b");
        book.credit(a, 10).unwrap();
        book.credit(b, 20).unwrap();
        book.drain(&a);

        let live = book.non_zero();
        assert_eq!(live, vec![(b, 20)]);
    }

    #[test]
    fn serde_roundtrip() {
        let mut book = BalanceBook::new();
        book.credit(asset(b"a"), 42).unwrap();
        let json = serde_json::to_string(&book).unwrap();
        let recovered: BalanceBook = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.get(&asset(b"a")), 42);
    }
}
