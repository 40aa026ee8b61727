//! # Identities — Accounts and Vaults
//!
//! Two handle types flow through every GrowVault operation:
//!
//! - [`AccountId`] — the identity of a participant on the asset ledger:
//!   vault owners, depositors, the developer beneficiary, and the factory
//!   itself.
//! - [`VaultId`] — the identity of a savings vault. Content-addressed:
//!   derived from the creation parameters, so any party can compute a
//!   vault's identity *before* the vault exists and the factory will
//!   produce exactly that identity when asked to create it.
//!
//! A vault is itself a participant on the asset ledger (it holds custody
//! of deposits), so a `VaultId` converts losslessly into the `AccountId`
//! under which the vault's funds are booked.
//!
//! ## Derivation contract
//!
//! [`VaultId::derive`] is pure and total. The input encoding is frozen
//! and versioned via the derive-key context in [`crate::config`]; see the
//! method docs for the exact byte layout. External predictors must
//! reproduce it bit for bit — that is the whole point.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{ACCOUNT_ID_CONTEXT, VAULT_ID_CONTEXT};
use crate::crypto::hash::domain_separated_hash;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from parsing identifier strings.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The decoded bytes have the wrong length.
    #[error("invalid identifier length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        got: usize,
    },
}

fn decode_id_hex(s: &str) -> Result<[u8; 32], IdentityError> {
    let bytes = hex::decode(s)?;
    if bytes.len() != 32 {
        return Err(IdentityError::InvalidLength {
            expected: 32,
            got: bytes.len(),
        });
    }
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// A 32-byte ledger identity.
///
/// The protocol does not care where the bytes come from — a hashed public
/// key, an external chain address, or a seed-derived test identity all
/// work. Equality of the bytes is equality of the identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derives an `AccountId` from an arbitrary seed.
    ///
    /// Hashes the seed under the account derivation context, so seeds can
    /// never collide with vault or asset identities. Handy for tests and
    /// demos (`AccountId::from_seed(b"alice")`), and for systems that key
    /// accounts by external material rather than raw 32-byte values.
    pub fn from_seed(seed: &[u8]) -> Self {
        Self(domain_separated_hash(ACCOUNT_ID_CONTEXT, seed))
    }

    /// Returns the raw 32-byte identifier.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the hex-encoded identifier.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a hex-encoded identifier.
    pub fn from_hex(s: &str) -> Result<Self, IdentityError> {
        decode_id_hex(s).map(Self)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({}...)", &self.to_hex()[..12])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for AccountId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for AccountId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            AccountId::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            if bytes.len() != 32 {
                return Err(serde::de::Error::custom(format!(
                    "expected 32-byte account id, got {}",
                    bytes.len()
                )));
            }
            let mut arr = [0u8; 32];
            arr.copy_from_slice(&bytes);
            Ok(AccountId(arr))
        }
    }
}

// ---------------------------------------------------------------------------
// VaultId
// ---------------------------------------------------------------------------

/// A unique, content-addressed identifier for a savings vault.
///
/// Computed over `(factory, creator, purpose, duration, salt)` — see
/// [`derive`](Self::derive). Two creations with identical parameters
/// always produce the same ID, which is why the factory must reject the
/// second one instead of silently overwriting the first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VaultId([u8; 32]);

impl VaultId {
    /// Creates a `VaultId` from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 32-byte identifier.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the hex-encoded identifier.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a hex-encoded identifier.
    pub fn from_hex(s: &str) -> Result<Self, IdentityError> {
        decode_id_hex(s).map(Self)
    }

    /// Derives the vault identity for the given creation parameters.
    ///
    /// Pure and stateless: calling this before creation yields exactly
    /// the identity [`crate::factory::VaultFactory::create_vault`] will
    /// produce for the same inputs, and any external party can reproduce
    /// it from public data alone.
    ///
    /// The hash input is BLAKE3 in derive-key mode under
    /// [`crate::config::VAULT_ID_CONTEXT`], over the concatenation of:
    ///
    /// ```text
    /// factory   — 32 bytes
    /// creator   — 32 bytes
    /// len(purpose) — u32 LE
    /// purpose   — UTF-8 bytes
    /// duration  — u64 LE (seconds)
    /// salt      — 32 bytes
    /// ```
    ///
    /// `purpose` is the only variable-length field and carries a length
    /// prefix, so no two distinct parameter tuples encode to the same
    /// byte string. This layout is frozen under the `v1` context.
    pub fn derive(
        factory: &AccountId,
        creator: &AccountId,
        purpose: &str,
        duration: u64,
        salt: &[u8; 32],
    ) -> Self {
        let mut preimage = Vec::with_capacity(32 + 32 + 4 + purpose.len() + 8 + 32);
        preimage.extend_from_slice(factory.as_bytes());
        preimage.extend_from_slice(creator.as_bytes());
        preimage.extend_from_slice(&(purpose.len() as u32).to_le_bytes());
        preimage.extend_from_slice(purpose.as_bytes());
        preimage.extend_from_slice(&duration.to_le_bytes());
        preimage.extend_from_slice(salt);

        Self(domain_separated_hash(VAULT_ID_CONTEXT, &preimage))
    }
}

impl fmt::Debug for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VaultId({}...)", &self.to_hex()[..12])
    }
}

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for VaultId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// A vault holds custody of deposits under its own identity, so its
/// ledger account is the vault identity verbatim.
impl From<VaultId> for AccountId {
    fn from(id: VaultId) -> Self {
        AccountId(id.0)
    }
}

impl Serialize for VaultId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for VaultId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            VaultId::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            if bytes.len() != 32 {
                return Err(serde::de::Error::custom(format!(
                    "expected 32-byte vault id, got {}",
                    bytes.len()
                )));
            }
            let mut arr = [0u8; 32];
            arr.copy_from_slice(&bytes);
            Ok(VaultId(arr))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
