//! # In-Memory Asset Ledger
//!
//! A reference [`AssetLedger`] holding balances and allowances in plain
//! maps. This is what tests and the demo binary run against — a mock
//! token in all but name.
//!
//! Semantics follow the usual fungible-token rules: `mint` credits out
//! of thin air (test fixture, not a protocol operation), `approve` sets
//! an allowance, and `transfer_from` consumes allowance as it pulls.
//! Every mutating call either fully applies or returns an error having
//! changed nothing.

use std::collections::HashMap;

use super::ledger::{AssetLedger, LedgerError};
use super::token::AssetId;
use crate::identity::AccountId;

/// Balances and allowances for any number of assets, in memory.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    /// `(asset, holder) -> balance`.
    balances: HashMap<(AssetId, AccountId), u64>,
    /// `(asset, holder, spender) -> remaining allowance`.
    allowances: HashMap<(AssetId, AccountId, AccountId), u64>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `asset` to `to` out of thin air.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the credit would exceed
    /// `u64::MAX`.
    pub fn mint(
        &mut self,
        asset: &AssetId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.credit(asset, to, amount)
    }

    /// Sets (not adds to) the allowance `holder` grants `spender`.
    pub fn approve(
        &mut self,
        asset: &AssetId,
        holder: &AccountId,
        spender: &AccountId,
        amount: u64,
    ) {
        self.allowances.insert((*asset, *holder, *spender), amount);
    }

    /// Returns the remaining allowance `holder` has granted `spender`.
    pub fn allowance(&self, asset: &AssetId, holder: &AccountId, spender: &AccountId) -> u64 {
        self.allowances
            .get(&(*asset, *holder, *spender))
            .copied()
            .unwrap_or(0)
    }

    fn credit(
        &mut self,
        asset: &AssetId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let balance = self.balances.entry((*asset, *to)).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow {
            asset: *asset,
            holder: *to,
            current: *balance,
            credit: amount,
        })?;
        Ok(())
    }

    fn debit(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(asset, from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                asset: *asset,
                holder: *from,
                available,
                requested: amount,
            });
        }
        self.balances.insert((*asset, *from), available - amount);
        Ok(())
    }

    /// Moves `amount` between accounts with feasibility checked up front,
    /// so a failure leaves both sides untouched.
    fn do_move(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(asset, from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                asset: *asset,
                holder: *from,
                available,
                requested: amount,
            });
        }
        // Self-transfers must not double-apply; the recipient credit is
        // checked before the sender debit for the same reason.
        if from == to {
            return Ok(());
        }
        let recipient = self.balance_of(asset, to);
        recipient.checked_add(amount).ok_or(LedgerError::Overflow {
            asset: *asset,
            holder: *to,
            current: recipient,
            credit: amount,
        })?;

        self.debit(asset, from, amount)?;
        self.credit(asset, to, amount)?;
        Ok(())
    }
}

impl AssetLedger for InMemoryLedger {
    fn transfer_from(
        &mut self,
        spender: &AccountId,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let allowed = self.allowance(asset, from, spender);
        if allowed < amount {
            return Err(LedgerError::InsufficientAllowance {
                asset: *asset,
                holder: *from,
                spender: *spender,
                available: allowed,
                requested: amount,
            });
        }

        self.do_move(asset, from, to, amount)?;

        // Consume allowance only once the move has committed.
        self.allowances
            .insert((*asset, *from, *spender), allowed - amount);

        tracing::debug!(
            asset = %asset,
            from = %from,
            to = %to,
            amount,
            "transfer_from applied"
        );
        Ok(())
    }

    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.do_move(asset, from, to, amount)?;
        tracing::debug!(asset = %asset, from = %from, to = %to, amount, "transfer applied");
        Ok(())
    }

    fn balance_of(&self, asset: &AssetId, who: &AccountId) -> u64 {
        self.balances.get(&(*asset, *who)).copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (InMemoryLedger, AssetId, AccountId, AccountId) {
        let ledger = InMemoryLedger::new();
        let asset = AssetId::derive("Mock USDT", "USDT", &AccountId::from_seed(b"issuer"));
        let alice = AccountId::from_seed(b"alice");
        let bob = AccountId::from_seed(b"bob");
        (ledger, asset, alice, bob)
    }

    #[test]
    fn mint_credits_balance() {
        let (mut ledger, asset, alice, _) = fixture();
        ledger.mint(&asset, &alice, 1_000).unwrap();
        assert_eq!(ledger.balance_of(&asset, &alice), 1_000);
    }

    #[test]
    fn unknown_account_holds_zero() {
        let (ledger, asset, alice, _) = fixture();
        assert_eq!(ledger.balance_of(&asset, &alice), 0);
    }

    #[test]
    fn transfer_moves_funds() {
        let (mut ledger, asset, alice, bob) = fixture();
        ledger.mint(&asset, &alice, 1_000).unwrap();
        ledger.transfer(&asset, &alice, &bob, 400).unwrap();
        assert_eq!(ledger.balance_of(&asset, &alice), 600);
        assert_eq!(ledger.balance_of(&asset, &bob), 400);
    }

    #[test]
    fn transfer_insufficient_balance_rejected() {
        let (mut ledger, asset, alice, bob) = fixture();
        ledger.mint(&asset, &alice, 100).unwrap();
        let err = ledger.transfer(&asset, &alice, &bob, 200).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientBalance {
                available: 100,
                requested: 200,
                ..
            }
        ));
        // Nothing moved.
        assert_eq!(ledger.balance_of(&asset, &alice), 100);
        assert_eq!(ledger.balance_of(&asset, &bob), 0);
    }

    #[test]
    fn self_transfer_is_a_noop() {
        let (mut ledger, asset, alice, _) = fixture();
        ledger.mint(&asset, &alice, 500).unwrap();
        ledger.transfer(&asset, &alice, &alice, 300).unwrap();
        assert_eq!(ledger.balance_of(&asset, &alice), 500);
    }

    #[test]
    fn transfer_from_requires_allowance() {
        let (mut ledger, asset, alice, bob) = fixture();
        let spender = AccountId::from_seed(b"vault");
        ledger.mint(&asset, &alice, 1_000).unwrap();

        let err = ledger
            .transfer_from(&spender, &asset, &alice, &bob, 100)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let (mut ledger, asset, alice, bob) = fixture();
        let spender = AccountId::from_seed(b"vault");
        ledger.mint(&asset, &alice, 1_000).unwrap();
        ledger.approve(&asset, &alice, &spender, 500);

        ledger
            .transfer_from(&spender, &asset, &alice, &bob, 300)
            .unwrap();
        assert_eq!(ledger.balance_of(&asset, &bob), 300);
        assert_eq!(ledger.allowance(&asset, &alice, &spender), 200);
    }

    #[test]
    fn failed_pull_leaves_allowance_intact() {
        let (mut ledger, asset, alice, bob) = fixture();
        let spender = AccountId::from_seed(b"vault");
        ledger.mint(&asset, &alice, 100).unwrap();
        ledger.approve(&asset, &alice, &spender, 500);

        let err = ledger
            .transfer_from(&spender, &asset, &alice, &bob, 300)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(ledger.allowance(&asset, &alice, &spender), 500);
    }

    #[test]
    fn recipient_overflow_rejected_without_partial_debit() {
        let (mut ledger, asset, alice, bob) = fixture();
        ledger.mint(&asset, &alice, 1_000).unwrap();
        ledger.mint(&asset, &bob, u64::MAX - 10).unwrap();

        let err = ledger.transfer(&asset, &alice, &bob, 100).unwrap_err();
        assert!(matches!(err, LedgerError::Overflow { .. }));
        assert_eq!(ledger.balance_of(&asset, &alice), 1_000);
        assert_eq!(ledger.balance_of(&asset, &bob), u64::MAX - 10);
    }

    #[test]
    fn balances_are_per_asset() {
        let (mut ledger, asset, alice, _) = fixture();
        let other = AssetId::derive("Mock DAI", "DAI", &AccountId::from_seed(b"issuer"));
        ledger.mint(&asset, &alice, 100).unwrap();
        ledger.mint(&other, &alice, 200).unwrap();
        assert_eq!(ledger.balance_of(&asset, &alice), 100);
        assert_eq!(ledger.balance_of(&other, &alice), 200);
    }
}
