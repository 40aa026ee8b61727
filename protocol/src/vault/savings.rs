//! # Savings Vault
//!
//! A [`SavingsVault`] is a single-owner, single-purpose, time-locked
//! container for any number of assets. Anyone may deposit into it;
//! anyone may trigger a withdrawal; but proceeds only ever flow to the
//! two roles fixed at creation — the owner and the developer
//! beneficiary. Withdrawing an asset before the vault matures routes a
//! fixed 15% penalty to the developer.
//!
//! ## Per-asset lifecycle
//!
//! Each asset moves independently between two states: **Open**
//! (non-zero balance) and **Drained** (zero). Deposits keep an asset
//! Open or reopen a Drained one — they are permitted forever, maturity
//! or not. A withdrawal drains the full balance in one shot; partial
//! withdrawals do not exist.
//!
//! ## Ordering discipline
//!
//! `withdraw` zeroes the balance *before* invoking the external
//! transfer capability. A reentrant call arriving through that
//! capability finds the balance already drained and fails with
//! [`VaultError::NothingToWithdraw`] instead of double-paying. If a
//! payout fails, the drained amount is restored (and any partial payout
//! reversed), so the operation is all-or-nothing.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use super::balance::{BalanceBook, BalanceError};
use crate::asset::{AssetId, AssetLedger, LedgerError};
use crate::clock::Clock;
use crate::config::{EARLY_WITHDRAWAL_PENALTY_DENOMINATOR, EARLY_WITHDRAWAL_PENALTY_NUMERATOR};
use crate::events::VaultEvent;
use crate::identity::{AccountId, VaultId};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from vault operations.
///
/// Every error aborts the whole operation: vault state and ledger state
/// are exactly what they were before the call.
#[derive(Debug, Error)]
pub enum VaultError {
    /// A zero-amount deposit, which is a no-op and likely a caller bug.
    #[error("deposit amount must be greater than zero")]
    InvalidAmount,

    /// The asset ledger refused a pull or a payout.
    #[error("asset transfer failed: {0}")]
    TransferFailed(#[from] LedgerError),

    /// Withdrawal of an asset with no balance — including the second of
    /// two back-to-back withdrawals and reentrant double-withdraw
    /// attempts.
    #[error("nothing to withdraw for asset {asset}")]
    NothingToWithdraw {
        /// The asset that had no balance.
        asset: AssetId,
    },

    /// Internal book-keeping failure (deposit overflow).
    #[error("balance error: {0}")]
    Balance(#[from] BalanceError),
}

// ---------------------------------------------------------------------------
// VaultConfig
// ---------------------------------------------------------------------------

/// The immutable parameters of a vault, fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// The account entitled to principal on withdrawal.
    pub owner: AccountId,

    /// The fixed beneficiary entitled to early-withdrawal penalties.
    pub developer: AccountId,

    /// Free-form label for what the owner is saving toward. Queryable,
    /// no other semantic effect.
    pub purpose: String,

    /// Lock duration in seconds.
    pub duration: u64,

    /// Creation timestamp (unix seconds); `start_time + duration` is the
    /// maturity instant.
    pub start_time: u64,
}

// ---------------------------------------------------------------------------
// WithdrawOutcome
// ---------------------------------------------------------------------------

/// Receipt returned by a successful [`SavingsVault::withdraw`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawOutcome {
    /// The asset that was settled.
    pub asset: AssetId,

    /// Amount paid to the owner.
    pub amount_to_owner: u64,

    /// Amount paid to the developer beneficiary (zero at/after maturity).
    pub penalty: u64,

    /// `true` if the withdrawal happened before maturity.
    pub was_early: bool,

    /// The timestamp at which the settlement was decided.
    pub timestamp: u64,
}

// ---------------------------------------------------------------------------
// Penalty math
// ---------------------------------------------------------------------------

/// Computes the early-withdrawal penalty: `floor(balance * 15 / 100)`.
///
/// Widened to `u128` for the intermediate product so the rate multiply
/// can never overflow. The owner's share is always computed as
/// `balance - penalty` by the caller — never as an independent 85%
/// calculation — so the two payouts sum to the balance exactly.
pub fn early_withdrawal_penalty(balance: u64) -> u64 {
    ((balance as u128 * EARLY_WITHDRAWAL_PENALTY_NUMERATOR as u128)
        / EARLY_WITHDRAWAL_PENALTY_DENOMINATOR as u128) as u64
}

// ---------------------------------------------------------------------------
// SavingsVault
// ---------------------------------------------------------------------------

/// A time-locked, multi-asset savings vault.
///
/// Holds custody of deposits under its own ledger account (the vault
/// identity), tracks them in a [`BalanceBook`], and settles them through
/// the [`AssetLedger`] the caller provides. The clock is injected at
/// construction so the maturity decision is testable without waiting.
pub struct SavingsVault {
    id: VaultId,
    config: VaultConfig,
    balances: BalanceBook,
    events: Vec<VaultEvent>,
    clock: Arc<dyn Clock>,
}

impl SavingsVault {
    /// Creates a vault with the given identity and configuration.
    ///
    /// Normally called by the factory, which derives `id` from the
    /// creation parameters; constructing one directly is fine for
    /// standalone use as long as the caller owns identity uniqueness.
    pub fn new(id: VaultId, config: VaultConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            id,
            config,
            balances: BalanceBook::new(),
            events: Vec::new(),
            clock,
        }
    }

    // -----------------------------------------------------------------------
    // Query surface
    // -----------------------------------------------------------------------

    /// The vault's identity.
    pub fn id(&self) -> VaultId {
        self.id
    }

    /// The ledger account holding this vault's custody balances.
    pub fn account(&self) -> AccountId {
        self.id.into()
    }

    /// The account entitled to principal.
    pub fn owner(&self) -> &AccountId {
        &self.config.owner
    }

    /// The penalty beneficiary.
    pub fn developer(&self) -> &AccountId {
        &self.config.developer
    }

    /// What the owner is saving toward.
    pub fn saving_purpose(&self) -> &str {
        &self.config.purpose
    }

    /// The lock duration in seconds.
    pub fn saving_duration(&self) -> u64 {
        self.config.duration
    }

    /// When the vault was created (unix seconds).
    pub fn start_time(&self) -> u64 {
        self.config.start_time
    }

    /// The maturity instant: `start_time + duration`.
    pub fn matures_at(&self) -> u64 {
        self.config.start_time.saturating_add(self.config.duration)
    }

    /// The full immutable configuration.
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// The vault's balance of `asset`. Never-deposited assets are zero.
    pub fn get_balance(&self, asset: &AssetId) -> u64 {
        self.balances.get(asset)
    }

    /// All assets with a non-zero balance.
    pub fn open_balances(&self) -> Vec<(AssetId, u64)> {
        self.balances.non_zero()
    }

    /// Everything this vault has ever emitted, in order.
    pub fn events(&self) -> &[VaultEvent] {
        &self.events
    }

    // -----------------------------------------------------------------------
    // Deposit
    // -----------------------------------------------------------------------

    /// Pulls `amount` of `asset` from `depositor` into vault custody.
    ///
    /// Open to any caller — deposits are a gift to the vault owner. The
    /// depositor must have granted the vault's account an allowance on
    /// the ledger beforehand.
    ///
    /// Returns the vault's new balance of the asset.
    ///
    /// # Errors
    ///
    /// [`VaultError::InvalidAmount`] for `amount == 0`;
    /// [`VaultError::Balance`] if the credit would overflow (checked
    /// before any ledger movement);
    /// [`VaultError::TransferFailed`] if the ledger rejects the pull.
    pub fn deposit(
        &mut self,
        ledger: &mut dyn AssetLedger,
        depositor: &AccountId,
        asset: AssetId,
        amount: u64,
    ) -> Result<u64, VaultError> {
        if amount == 0 {
            return Err(VaultError::InvalidAmount);
        }

        // Validate the credit before touching the ledger so an overflow
        // rejection has no external side effects.
        if !self.balances.can_credit(&asset, amount) {
            return Err(VaultError::Balance(BalanceError::Overflow {
                asset,
                current: self.balances.get(&asset),
                credit: amount,
            }));
        }

        let custody = self.account();
        ledger.transfer_from(&custody, &asset, depositor, &custody, amount)?;

        let new_balance = self.balances.credit(asset, amount)?;
        self.events.push(VaultEvent::Deposited { asset, amount });

        tracing::info!(
            vault = %self.id,
            asset = %asset,
            depositor = %depositor,
            amount,
            new_balance,
            "deposit received"
        );

        Ok(new_balance)
    }

    // -----------------------------------------------------------------------
    // Withdraw
    // -----------------------------------------------------------------------

    /// Settles the full balance of `asset`.
    ///
    /// Open-trigger, fixed-destination: any caller may invoke this, but
    /// the payout always goes to the owner, with the 15% penalty going
    /// to the developer when `now - start_time < duration`. The
    /// maturity branch is decided atomically here and the drained
    /// balance is split exactly — `amount_to_owner + penalty` equals the
    /// pre-withdrawal balance for every balance.
    ///
    /// # Errors
    ///
    /// [`VaultError::NothingToWithdraw`] if the asset's balance is zero;
    /// [`VaultError::TransferFailed`] if a payout is refused, in which
    /// case the balance is restored and any partial payout reversed.
    pub fn withdraw(
        &mut self,
        ledger: &mut dyn AssetLedger,
        asset: &AssetId,
    ) -> Result<WithdrawOutcome, VaultError> {
        // Effects before interactions: drain first, so a reentrant call
        // through the transfer capability sees an empty balance.
        let balance = self.balances.drain(asset);
        if balance == 0 {
            return Err(VaultError::NothingToWithdraw { asset: *asset });
        }

        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.config.start_time);
        let was_early = elapsed < self.config.duration;
        let penalty = if was_early {
            early_withdrawal_penalty(balance)
        } else {
            0
        };
        let amount_to_owner = balance - penalty;

        let custody = self.account();
        if let Err(e) = ledger.transfer(asset, &custody, &self.config.owner, amount_to_owner) {
            self.balances.restore(*asset, balance);
            return Err(VaultError::TransferFailed(e));
        }

        if penalty > 0 {
            if let Err(e) = ledger.transfer(asset, &custody, &self.config.developer, penalty) {
                // Reverse the owner payout; those funds just landed in
                // the owner account, so a conforming ledger accepts the
                // reversal.
                let _ = ledger.transfer(asset, &self.config.owner, &custody, amount_to_owner);
                self.balances.restore(*asset, balance);
                return Err(VaultError::TransferFailed(e));
            }
        }

        self.events.push(VaultEvent::Withdrawn {
            asset: *asset,
            amount_to_owner,
            was_early,
        });

        if was_early {
            tracing::warn!(
                vault = %self.id,
                asset = %asset,
                amount_to_owner,
                penalty,
                "early withdrawal — penalty applied"
            );
        } else {
            tracing::info!(
                vault = %self.id,
                asset = %asset,
                amount_to_owner,
                "matured withdrawal"
            );
        }

        Ok(WithdrawOutcome {
            asset: *asset,
            amount_to_owner,
            penalty,
            was_early,
            timestamp: now,
        })
    }
}

impl std::fmt::Debug for SavingsVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SavingsVault")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("balances", &self.balances)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
