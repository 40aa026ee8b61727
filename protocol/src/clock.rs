//! # Time Source
//!
//! The withdrawal state machine branches on elapsed time, so the vault
//! needs a clock it can trust — and tests need a clock they can control.
//! [`Clock`] is the seam: [`SystemClock`] for real deployments,
//! [`ManualClock`] for deterministic tests and demos ("advance time by
//! thirty days" without waiting thirty days).
//!
//! Time is unix seconds as `u64`. The penalty branch only ever compares
//! `now - start_time` against a duration, so second granularity is all
//! the precision this protocol needs.

use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

/// A monotonic-enough source of the current unix time in seconds.
///
/// Implementations must be shareable across the factory and every vault
/// it creates, so the trait requires `Send + Sync` and is typically used
/// behind an `Arc<dyn Clock>`.
pub trait Clock: Send + Sync {
    /// Returns the current unix timestamp in seconds.
    fn now(&self) -> u64;
}

/// Wall-clock time via `chrono`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // Negative timestamps predate 1970; clamp rather than wrap.
        Utc::now().timestamp().max(0) as u64
    }
}

/// A hand-cranked clock for tests and demos.
///
/// Starts at an explicit timestamp and only moves when told to. Interior
/// mutability lets the same `Arc<ManualClock>` be held by the factory,
/// its vaults, and the test driving them.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<u64>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: u64) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    /// Creates a shared clock frozen at `start`.
    pub fn shared(start: u64) -> Arc<Self> {
        Arc::new(Self::new(start))
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance(&self, seconds: u64) {
        let mut now = self.now.write();
        *now = now.saturating_add(seconds);
    }

    /// Sets the clock to an absolute timestamp.
    pub fn set(&self, timestamp: u64) {
        *self.now.write() = timestamp;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        *self.now.read()
    }
}
