//! # Asset Module — The Transferable-Balance Boundary
//!
//! GrowVault treats assets as opaque, fungible, transferable balances:
//!
//! ```text
//! token.rs  — asset identities: content-addressed AssetId + metadata
//! ledger.rs — the AssetLedger trait the vault moves balances through
//! memory.rs — an in-memory ledger for tests and demos
//! ```
//!
//! The vault never mints, burns, or prices anything. It pulls deposits
//! in through [`AssetLedger::transfer_from`] and pays withdrawals out
//! through [`AssetLedger::transfer`]; everything else about an asset is
//! somebody else's problem.

pub mod ledger;
pub mod memory;
pub mod token;

pub use ledger::{AssetLedger, LedgerError};
pub use memory::InMemoryLedger;
pub use token::{AssetId, AssetInfo};
