//! # Vault Module — Custody and Settlement
//!
//! ```text
//! balance.rs — per-asset balance book with drain/restore semantics
//! savings.rs — the time-locked SavingsVault state machine
//! ```
//!
//! The factory in [`crate::factory`] creates vaults; everything about
//! holding and settling funds lives here.

pub mod balance;
pub mod savings;

pub use balance::{BalanceBook, BalanceError};
pub use savings::{early_withdrawal_penalty, SavingsVault, VaultConfig, VaultError, WithdrawOutcome};
