//! CLI commands for the ledger host
//!
//! Implements all command handlers for the CLI interface. The CLI plays the
//! sequencing authority of the execution model: it loads the snapshot, runs
//! exactly one operation, and persists the result before exiting.

use crate::account::Address;
use crate::ledger::{LedgerEvent, TokenLedger, UNITS_PER_TOKEN};
use crate::storage::{self, LedgerStore, StoreConfig};
use std::path::{Path, PathBuf};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub ledger: TokenLedger,
    pub store: LedgerStore,
}

impl AppState {
    /// Load the deployed ledger. Every command except `deploy`, `account`,
    /// and `import` requires one to exist already.
    pub fn load(data_dir: PathBuf) -> CliResult<Self> {
        let store = LedgerStore::new(StoreConfig {
            data_dir,
            ..Default::default()
        })?;

        if !store.exists() {
            return Err("no ledger found; run `ledger deploy` first".into());
        }

        let ledger = store.load()?;
        Ok(Self { ledger, store })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.store.save(&self.ledger)?;
        Ok(())
    }
}

/// Deploy a new ledger
pub fn cmd_deploy(
    data_dir: &Path,
    name: &str,
    symbol: &str,
    supply: u128,
    deployer: &str,
) -> CliResult<()> {
    let store = LedgerStore::new(StoreConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    })?;

    if store.exists() {
        println!("⚠️  A ledger already exists at {:?}", data_dir);
        println!("   Delete the data directory to start over.");
        return Ok(());
    }

    let deployer: Address = deployer.parse()?;
    let ledger = TokenLedger::deploy(name, symbol, supply, &deployer)?;
    store.save(&ledger)?;

    println!("✅ Ledger deployed!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   🏷️  Token: {} ({})", ledger.name(), ledger.symbol());
    println!("   💰 Supply: {} base units", ledger.total_supply());
    println!("   👤 Deployer: {}", deployer);

    Ok(())
}

/// Generate a fresh random account address
pub fn cmd_account_new() -> CliResult<()> {
    let address = Address::random();

    println!("🔐 New account generated!");
    println!("   📍 Address: {}", address);
    println!("\n   ℹ️  The ledger trusts the host for caller identity;");
    println!("   pass this address as --from / --owner / --spender.");

    Ok(())
}

/// Display ledger information
pub fn cmd_info(state: &AppState) -> CliResult<()> {
    let ledger = &state.ledger;

    println!("📒 Ledger Info");
    println!("   ├─ Name: {}", ledger.name());
    println!("   ├─ Symbol: {}", ledger.symbol());
    println!("   ├─ Decimals: {}", ledger.decimals());
    println!("   ├─ Total supply: {} base units", ledger.total_supply());
    println!("   ├─ Holders: {}", ledger.holder_count());
    println!("   └─ Events recorded: {}", ledger.events().len());

    Ok(())
}

/// Show the balance of an account
pub fn cmd_balance(state: &AppState, account: &str) -> CliResult<()> {
    let account: Address = account.parse()?;
    let balance = state.ledger.balance_of(&account);

    println!("💰 Balance for {}", account);
    println!("   Total: {} base units", balance);
    println!("   ({} whole tokens)", balance / UNITS_PER_TOKEN);

    Ok(())
}

/// Show the remaining allowance for an (owner, spender) pair
pub fn cmd_allowance(state: &AppState, owner: &str, spender: &str) -> CliResult<()> {
    let owner: Address = owner.parse()?;
    let spender: Address = spender.parse()?;
    let allowance = state.ledger.allowance(&owner, &spender);

    println!("🔏 Allowance");
    println!("   Owner: {}", owner);
    println!("   Spender: {}", spender);
    println!("   Remaining: {} base units", allowance);

    Ok(())
}

/// Transfer base units between accounts
pub fn cmd_transfer(state: &mut AppState, from: &str, to: &str, amount: u128) -> CliResult<()> {
    let from: Address = from.parse()?;
    let to: Address = to.parse()?;

    let record = state.ledger.transfer(&from, &to, amount)?;
    state.save()?;

    println!("📤 Transfer committed:");
    println!("   From: {}", record.from);
    println!("   To: {}", record.to);
    println!("   Amount: {} base units", record.amount);
    println!("   New sender balance: {}", state.ledger.balance_of(&from));

    Ok(())
}

/// Approve a spender for an exact limit
pub fn cmd_approve(state: &mut AppState, owner: &str, spender: &str, amount: u128) -> CliResult<()> {
    let owner: Address = owner.parse()?;
    let spender: Address = spender.parse()?;

    let record = state.ledger.approve(&owner, &spender, amount)?;
    state.save()?;

    println!("🔏 Approval committed:");
    println!("   Owner: {}", record.owner);
    println!("   Spender: {}", record.spender);
    println!("   Limit: {} base units", record.amount);

    Ok(())
}

/// Delegated transfer by an approved spender
pub fn cmd_transfer_from(
    state: &mut AppState,
    spender: &str,
    owner: &str,
    to: &str,
    amount: u128,
) -> CliResult<()> {
    let spender: Address = spender.parse()?;
    let owner: Address = owner.parse()?;
    let to: Address = to.parse()?;

    let record = state.ledger.transfer_from(&spender, &owner, &to, amount)?;
    state.save()?;

    println!("📤 Delegated transfer committed:");
    println!("   Owner: {}", record.from);
    println!("   To: {}", record.to);
    println!("   Amount: {} base units", record.amount);
    println!(
        "   Remaining allowance: {}",
        state.ledger.allowance(&owner, &spender)
    );

    Ok(())
}

/// Show recent ledger events
pub fn cmd_events(state: &AppState, count: usize) -> CliResult<()> {
    let events = state.ledger.events();

    if events.is_empty() {
        println!("📭 No events recorded yet.");
        return Ok(());
    }

    println!("📜 Recent events (newest first):");
    for event in events.iter().rev().take(count) {
        let timestamp = match event {
            LedgerEvent::Transfer(t) => t.timestamp,
            LedgerEvent::Approval(a) => a.timestamp,
        };
        println!(
            "   {} | {}",
            timestamp.format("%Y-%m-%d %H:%M:%S"),
            event.describe()
        );
    }

    Ok(())
}

/// Audit the conservation invariant
pub fn cmd_verify(state: &AppState) -> CliResult<()> {
    println!("🔍 Auditing ledger...");

    if state.ledger.verify_conservation() {
        println!("✅ Conservation holds!");
        println!(
            "   {} base units across {} holders",
            state.ledger.total_supply(),
            state.ledger.holder_count()
        );
    } else {
        println!("❌ Conservation audit FAILED!");
        println!("   The snapshot may have been tampered with.");
    }

    Ok(())
}

/// Export the ledger snapshot to a file
pub fn cmd_export(state: &AppState, path: &Path) -> CliResult<()> {
    storage::save_to_file(&state.ledger, path)?;
    println!("📦 Ledger exported to {:?}", path);
    Ok(())
}

/// Import a ledger snapshot from a file, replacing the stored one
pub fn cmd_import(data_dir: &Path, path: &Path) -> CliResult<()> {
    let ledger = storage::load_from_file(path)?;

    if !ledger.verify_conservation() {
        println!("❌ Imported ledger fails the conservation audit!");
        return Ok(());
    }

    let store = LedgerStore::new(StoreConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    })?;
    store.save(&ledger)?;

    println!("📥 Ledger imported from {:?}", path);
    println!("   Token: {} ({})", ledger.name(), ledger.symbol());
    println!("   Holders: {}", ledger.holder_count());

    Ok(())
}
