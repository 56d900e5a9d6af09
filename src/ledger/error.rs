//! Ledger error kinds
//!
//! Every error aborts the whole operation with zero state mutation.
//! Retry policy, if any, belongs to the caller.

use thiserror::Error;

/// Errors raised by ledger operations
#[derive(Error, Debug, Clone)]
pub enum LedgerError {
    #[error("Invalid construction: {0}")]
    InvalidConstruction(String),
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },
    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: u128, need: u128 },
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
    #[error("Invalid recipient: the zero address cannot hold tokens")]
    InvalidRecipient,
}
