//! Fixed-supply fungible token ledger
//!
//! Provides the core accounting state machine with:
//! - Balances per address with default-zero semantics
//! - Allowances for delegated transfers
//! - Transfer, approve, and transfer-from operations
//! - Checked arithmetic and a conservation audit
//!
//! # Example
//!
//! ```ignore
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
//!
//! // Check balance
//! let balance = ledger.balance_of(&bob);
//! ```

pub mod allowances;
pub mod balances;
pub mod error;
pub mod events;
pub mod ledger;
pub mod metadata;

pub use allowances::AllowanceSheet;
pub use balances::BalanceSheet;
pub use error::LedgerError;
pub use events::{ApprovalRecord, LedgerEvent, TransferRecord, MAX_EVENT_HISTORY};
pub use ledger::TokenLedger;
pub use metadata::{to_base_units, TokenMetadata, DECIMALS, UNITS_PER_TOKEN};
