//! # CLI Interface
//!
//! Defines the command-line argument structure for `growvault` using
//! `clap` derive. Supports three subcommands: `predict`, `demo`, and
//! `version`.

use clap::{Parser, Subcommand};

/// GrowVault command-line tool.
///
/// Predicts vault identities offline and runs a full save/withdraw
/// lifecycle against an in-memory ledger, so the protocol can be
/// exercised without standing up any infrastructure.
#[derive(Parser, Debug)]
#[command(
    name = "growvault",
    about = "GrowVault deterministic savings protocol tool",
    version,
    propagate_version = true
)]
pub struct GrowVaultCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `growvault` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the identity a vault creation would produce, without
    /// creating anything.
    Predict(PredictArgs),
    /// Run the full protocol lifecycle on an in-memory ledger: create a
    /// vault, deposit, withdraw early, then withdraw at maturity.
    Demo(DemoArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `predict` subcommand.
#[derive(Parser, Debug)]
pub struct PredictArgs {
    /// Hex-encoded 32-byte factory account identity.
    #[arg(long)]
    pub factory: String,

    /// Hex-encoded 32-byte creator account identity.
    #[arg(long)]
    pub creator: String,

    /// What the owner is saving toward.
    #[arg(long)]
    pub purpose: String,

    /// Lock duration in seconds.
    #[arg(long)]
    pub duration: u64,

    /// Hex-encoded salt, up to 32 bytes; shorter values are left-padded
    /// with zeros. Defaults to all zeros.
    #[arg(long, default_value = "00")]
    pub salt: String,

    /// Emit the result as a JSON object instead of plain text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `demo` subcommand.
#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// The saving purpose for the demo vault.
    #[arg(long, default_value = "Buy a new laptop")]
    pub purpose: String,

    /// Lock duration in seconds. Defaults to thirty days.
    #[arg(long, default_value_t = 2_592_000)]
    pub duration: u64,

    /// Amount deposited into each demo vault, in smallest units.
    #[arg(long, default_value_t = 100)]
    pub amount: u64,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "GROWVAULT_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,
}
