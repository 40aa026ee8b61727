//! # Protocol Configuration & Constants
//!
//! Every magic number in GrowVault lives here. If you're hardcoding a
//! constant somewhere else, you're doing it wrong.
//!
//! The derivation context strings are part of the public identity
//! contract: any external party predicting a vault identity must use the
//! exact same contexts and encoding. Changing one after identities have
//! been published orphans every identity derived under it, so treat them
//! as frozen and bump the version suffix instead.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// The protocol version string. Bump on any change to the derivation
/// encoding or the withdrawal state machine.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Derivation Contexts
// ---------------------------------------------------------------------------

/// BLAKE3 derive-key context for vault identity derivation.
///
/// Input encoding (see [`crate::identity::VaultId::derive`]): every
/// variable-length field is prefixed with its length as a `u32` LE so
/// that adjacent fields can never be confused for one another.
pub const VAULT_ID_CONTEXT: &str = "growvault:vault-id:v1";

/// BLAKE3 derive-key context for seed-derived account identities.
pub const ACCOUNT_ID_CONTEXT: &str = "growvault:account-id:v1";

/// BLAKE3 derive-key context for asset identity derivation.
pub const ASSET_ID_CONTEXT: &str = "growvault:asset-id:v1";

// ---------------------------------------------------------------------------
// Withdrawal Penalty
// ---------------------------------------------------------------------------

/// Numerator of the early-withdrawal penalty rate. Withdrawing before
/// maturity sends `floor(balance * 15 / 100)` to the developer
/// beneficiary and the remainder to the owner.
pub const EARLY_WITHDRAWAL_PENALTY_NUMERATOR: u64 = 15;

/// Denominator of the early-withdrawal penalty rate.
pub const EARLY_WITHDRAWAL_PENALTY_DENOMINATOR: u64 = 100;

// ---------------------------------------------------------------------------
// Identifier Sizes
// ---------------------------------------------------------------------------

/// Length of every content-addressed identifier (BLAKE3 output size).
pub const ID_LENGTH: usize = 32;

/// Length of a creation salt. Matches the 32-byte salts used by
/// content-addressed deployment schemes, so existing salt material can be
/// carried over unchanged.
pub const SALT_LENGTH: usize = 32;
