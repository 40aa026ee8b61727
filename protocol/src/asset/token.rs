//! # Asset Identities
//!
//! Every fungible asset a vault can hold — a stablecoin, a wrapped
//! token, loyalty points — is referenced by an [`AssetId`]. IDs are
//! deterministic BLAKE3 hashes of the asset's canonical properties
//! (name, symbol, issuer), so the same asset always gets the same ID
//! wherever it is registered. No registry, no coordination.
//!
//! The protocol never implements a token. It only names them; moving
//! their balances is the job of whatever [`AssetLedger`]
//! (`super::ledger::AssetLedger`) the caller provides.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ASSET_ID_CONTEXT;
use crate::crypto::hash::domain_separated_hash;
use crate::identity::{AccountId, IdentityError};

// ---------------------------------------------------------------------------
// AssetId
// ---------------------------------------------------------------------------

/// A unique, content-addressed identifier for an asset type.
///
/// Computed as a domain-separated BLAKE3 hash over
/// `(name, symbol, issuer)` with length-prefixed fields. Two assets with
/// identical properties always produce the same ID.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId([u8; 32]);

impl AssetId {
    /// Creates an `AssetId` from raw bytes.
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
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(IdentityError::InvalidLength {
                expected: 32,
                got: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Derives an `AssetId` from the canonical asset properties.
    ///
    /// Variable-length fields carry a `u32` LE length prefix so adjacent
    /// fields can never bleed into one another.
    pub fn derive(name: &str, symbol: &str, issuer: &AccountId) -> Self {
        let mut preimage = Vec::with_capacity(4 + name.len() + 4 + symbol.len() + 32);
        preimage.extend_from_slice(&(name.len() as u32).to_le_bytes());
        preimage.extend_from_slice(name.as_bytes());
        preimage.extend_from_slice(&(symbol.len() as u32).to_le_bytes());
        preimage.extend_from_slice(symbol.as_bytes());
        preimage.extend_from_slice(issuer.as_bytes());

        Self(domain_separated_hash(ASSET_ID_CONTEXT, &preimage))
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({}...)", &self.to_hex()[..12])
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for AssetId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for AssetId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            AssetId::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            if bytes.len() != 32 {
                return Err(serde::de::Error::custom(format!(
                    "expected 32-byte asset id, got {}",
                    bytes.len()
                )));
            }
            let mut arr = [0u8; 32];
            arr.copy_from_slice(&bytes);
            Ok(AssetId(arr))
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helper: HashMap<AssetId, V> with hex-string keys
// ---------------------------------------------------------------------------

/// Serde helper for `HashMap<AssetId, V>` as a JSON object with
/// hex-encoded string keys.
///
/// JSON map keys must be strings, but `AssetId` wraps `[u8; 32]`, which
/// serde would otherwise reject as a map key. This module bridges the
/// two via the hex representation.
pub mod asset_id_map {
    use super::AssetId;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    pub fn serialize<V, S>(map: &HashMap<AssetId, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        V: Serialize,
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut ser_map = serializer.serialize_map(Some(map.len()))?;
        for (key, value) in map {
            ser_map.serialize_entry(&key.to_hex(), value)?;
        }
        ser_map.end()
    }

    pub fn deserialize<'de, V, D>(deserializer: D) -> Result<HashMap<AssetId, V>, D::Error>
    where
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let string_map: HashMap<String, V> = HashMap::deserialize(deserializer)?;
        string_map
            .into_iter()
            .map(|(key, value)| {
                AssetId::from_hex(&key)
                    .map(|id| (id, value))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// AssetInfo
// ---------------------------------------------------------------------------

/// Metadata for an asset, with its derived identity.
///
/// `decimals` is display-only; all protocol arithmetic happens in
/// smallest units and never divides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    /// Content-addressed identifier derived from this asset's properties.
    pub id: AssetId,

    /// Human-readable asset name (e.g., "Mock USDT").
    pub name: String,

    /// Trading symbol (e.g., "USDT").
    pub symbol: String,

    /// Display decimal places.
    pub decimals: u8,

    /// Ledger identity of the issuing entity.
    pub issuer: AccountId,
}

impl AssetInfo {
    /// Creates an `AssetInfo` with a deterministically derived [`AssetId`].
    ///
    /// This is the only correct way to register an asset — it keeps the
    /// ID consistent with the properties.
    pub fn new(name: &str, symbol: &str, decimals: u8, issuer: AccountId) -> Self {
        Self {
            id: AssetId::derive(name, symbol, &issuer),
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
            issuer,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
