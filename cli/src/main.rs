// Copyright (c) 2026 GrowVault Labs. MIT License.
// See LICENSE for details.

//! # GrowVault CLI
//!
//! Entry point for the `growvault` binary. Parses CLI arguments,
//! initializes logging, and dispatches to the subcommands:
//!
//! - `predict` — compute a vault identity offline from creation parameters
//! - `demo`    — run the full save/withdraw lifecycle on an in-memory ledger
//! - `version` — print build version information

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;

use growvault_protocol::asset::{AssetId, AssetLedger, InMemoryLedger};
use growvault_protocol::clock::{Clock, ManualClock, SystemClock};
use growvault_protocol::factory::VaultFactory;
use growvault_protocol::identity::{AccountId, VaultId};

use cli::{Commands, GrowVaultCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = GrowVaultCli::parse();

    match cli.command {
        Commands::Predict(args) => predict(args),
        Commands::Demo(args) => run_demo(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Computes a vault identity from creation parameters and prints it.
///
/// Pure computation — no factory, no ledger, no clock. The printed
/// identity matches what a factory with the given identity would
/// register for the same parameters.
fn predict(args: cli::PredictArgs) -> Result<()> {
    let factory = AccountId::from_hex(&args.factory)
        .with_context(|| format!("invalid factory identity: {}", args.factory))?;
    let creator = AccountId::from_hex(&args.creator)
        .with_context(|| format!("invalid creator identity: {}", args.creator))?;
    let salt = parse_salt(&args.salt)?;

    let vault = VaultId::derive(&factory, &creator, &args.purpose, args.duration, &salt);

    if args.json {
        let out = serde_json::json!({
            "vault_id": vault.to_hex(),
            "factory": factory.to_hex(),
            "creator": creator.to_hex(),
            "purpose": args.purpose,
            "duration": args.duration,
            "salt": hex::encode(salt),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", vault.to_hex());
    }

    Ok(())
}

/// Runs the whole protocol lifecycle against an in-memory ledger.
///
/// Creates two vaults with the same parameters but different salts,
/// funds both, withdraws one immediately (penalty path) and the other
/// after advancing the clock past maturity (full payout path).
fn run_demo(args: cli::DemoArgs) -> Result<()> {
    logging::init_logging(
        "growvault_cli=info,growvault_protocol=info",
        LogFormat::from_str_lossy(&args.log_format),
    );

    // A manual clock seeded from wall time, so maturity can be reached
    // by advancing instead of waiting.
    let clock = ManualClock::shared(SystemClock.now());

    let developer = AccountId::from_bytes(rand::random());
    let alice = AccountId::from_bytes(rand::random());
    let issuer = AccountId::from_bytes(rand::random());
    let factory_id = AccountId::from_bytes(rand::random());

    let asset = AssetId::derive("Mock USDT", "USDT", &issuer);
    let mut ledger = InMemoryLedger::new();
    ledger
        .mint(&asset, &alice, args.amount.saturating_mul(10))
        .context("failed to fund the demo depositor")?;

    let mut factory = VaultFactory::new(factory_id, developer, clock.clone());

    println!("GrowVault demo");
    println!("  factory   : {}", factory.id());
    println!("  developer : {}", developer);
    println!("  owner     : {}", alice);
    println!("  asset     : {} (Mock USDT)", asset);
    println!();

    // --- Early withdrawal path ---
    let salt_a = [0u8; 32];
    let predicted = factory.predict_vault_id(&alice, &args.purpose, args.duration, &salt_a);
    let vault_a = factory.create_vault(&alice, &args.purpose, args.duration, &salt_a)?;
    assert_eq!(predicted, vault_a);
    println!("vault A created: {} (predicted identity matched)", vault_a);

    {
        let vault = factory
            .vault_mut(&vault_a)
            .context("vault A missing from registry")?;
        ledger.approve(&asset, &alice, &vault.account(), args.amount);
        vault.deposit(&mut ledger, &alice, asset, args.amount)?;
        let outcome = vault.withdraw(&mut ledger, &asset)?;
        println!(
            "vault A withdrawn immediately: owner {} / penalty {} (early: {})",
            outcome.amount_to_owner, outcome.penalty, outcome.was_early
        );
    }

    // --- Matured withdrawal path ---
    let salt_b = [1u8; 32];
    let vault_b = factory.create_vault(&alice, &args.purpose, args.duration, &salt_b)?;
    println!("vault B created: {}", vault_b);

    {
        let vault = factory
            .vault_mut(&vault_b)
            .context("vault B missing from registry")?;
        ledger.approve(&asset, &alice, &vault.account(), args.amount);
        vault.deposit(&mut ledger, &alice, asset, args.amount)?;

        clock.advance(args.duration.saturating_add(1));
        let outcome = vault.withdraw(&mut ledger, &asset)?;
        println!(
            "vault B withdrawn after maturity: owner {} / penalty {} (early: {})",
            outcome.amount_to_owner, outcome.penalty, outcome.was_early
        );
    }

    println!();
    println!("final balances");
    println!("  owner     : {}", ledger.balance_of(&asset, &alice));
    println!("  developer : {}", ledger.balance_of(&asset, &developer));

    Ok(())
}

/// Parses a hex salt of up to 32 bytes, left-padding with zeros.
fn parse_salt(s: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(s).with_context(|| format!("salt is not valid hex: {}", s))?;
    if bytes.len() > 32 {
        bail!("salt is {} bytes, maximum is 32", bytes.len());
    }
    let mut salt = [0u8; 32];
    salt[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(salt)
}

/// Prints version information to stdout.
fn print_version() {
    println!("growvault {}", env!("CARGO_PKG_VERSION"));
    println!("protocol  {}", growvault_protocol::config::PROTOCOL_VERSION);
}
