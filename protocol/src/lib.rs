// Copyright (c) 2026 GrowVault Labs. MIT License.
// See LICENSE for details.

//! # GrowVault Protocol — Core Library
//!
//! GrowVault is a deterministic savings protocol: commit funds to a
//! purpose-labeled vault, lock them for a duration you choose, and pay a
//! flat 15% penalty to the protocol developer if you cash out before the
//! lock expires. Discipline, priced.
//!
//! The protocol runs on three deliberately narrow ideas:
//!
//! - **Identities are derived, not assigned.** A vault's identity is a
//!   content hash of its creation parameters, so anyone can compute it
//!   before the vault exists and the same parameters can never name two
//!   different vaults.
//! - **Custody is a state machine.** Each asset in a vault is either
//!   Open or Drained; withdrawal drains the full balance atomically,
//!   before any external transfer fires.
//! - **Time is injected.** Vaults read a [`clock::Clock`], never the
//!   wall directly, so maturity is a testable decision instead of a
//!   scheduling problem.
//!
//! ## Architecture
//!
//! - **crypto** — BLAKE3 hashing with domain separation. Don't roll your own.
//! - **identity** — Content-addressed account and vault identities.
//! - **asset** — The transferable-balance boundary (trait + in-memory ledger).
//! - **clock** — Injectable time source, with a manual clock for tests.
//! - **vault** — Balance custody and the time-locked withdrawal machine.
//! - **factory** — Deterministic vault creation and the registry.
//! - **events** — Append-only records of everything observable.
//! - **config** — Protocol constants. One place, no scattering.
//!
//! ## Design Philosophy
//!
//! 1. Every settlement is all-or-nothing; partial payouts don't exist.
//! 2. The penalty split is exact: owner share + penalty == balance, always.
//! 3. If it touches funds, it has tests. Plural.

pub mod asset;
pub mod clock;
pub mod config;
pub mod crypto;
pub mod events;
pub mod factory;
pub mod identity;
pub mod vault;
