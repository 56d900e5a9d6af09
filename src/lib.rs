//! Token-Ledger: a fixed-supply fungible token ledger in Rust
//!
//! This crate provides an accountable, tamper-evident record of ownership
//! of a fungible asset, featuring:
//! - Fixed supply issued to the deployer at construction
//! - Per-holder balances with default-zero semantics
//! - Delegated transfers bounded by exact approval limits
//! - Checked arithmetic everywhere, with all-or-nothing commits
//! - A conservation audit (total supply == sum of balances)
//! - Observable Transfer/Approval history for subscribers
//! - JSON snapshot persistence for the CLI host
//!
//! # Example
//!
//! ```rust
//! use token_ledger::account::Address;
//! use token_ledger::ledger::{TokenLedger, UNITS_PER_TOKEN};
//!
//! let alice = Address::derive(b"alice");
//! let bob = Address::derive(b"bob");
//!
//! // Deploy with 10,000 whole tokens credited to alice
//! let mut ledger = TokenLedger::deploy("new", "token", 10_000, &alice).unwrap();
//!
//! // Move 500 tokens
//! ledger.transfer(&alice, &bob, 500 * UNITS_PER_TOKEN).unwrap();
//! assert_eq!(ledger.balance_of(&bob), 500 * UNITS_PER_TOKEN);
//!
//! // Supply is conserved at every observable point
//! assert!(ledger.verify_conservation());
//! ```

pub mod account;
pub mod cli;
pub mod ledger;
pub mod storage;

// Re-export commonly used types
pub use account::{Address, AddressParseError};
pub use ledger::{
    ApprovalRecord, LedgerError, LedgerEvent, TokenLedger, TokenMetadata, TransferRecord,
    DECIMALS, UNITS_PER_TOKEN,
};
pub use storage::{LedgerStore, StoreConfig, StoreError};
