//! Cryptographic primitives: BLAKE3 hashing with domain separation.
//!
//! Everything identity-related in GrowVault bottoms out here. Keep this
//! module small — one hash function, used consistently.

pub mod hash;

pub use hash::{blake3_hash, blake3_hash_multi, domain_separated_hash};
