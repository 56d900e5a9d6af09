//! Observable ledger events
//!
//! Records are appended to the ledger's history only after a mutation has
//! committed, so subscribers never observe a failed or partial operation.

use crate::account::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Most recent records retained in the in-memory history.
pub const MAX_EVENT_HISTORY: usize = 1024;

/// Emitted on every successful transfer or delegated transfer
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferRecord {
    pub from: Address,
    pub to: Address,
    pub amount: u128,
    pub timestamp: DateTime<Utc>,
}

/// Emitted on every successful approval
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApprovalRecord {
    pub owner: Address,
    pub spender: Address,
    pub amount: u128,
    pub timestamp: DateTime<Utc>,
}

/// A single entry in the ledger's observable history
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEvent {
    Transfer(TransferRecord),
    Approval(ApprovalRecord),
}

impl LedgerEvent {
    /// One-line human-readable rendering for the CLI `events` view
    pub fn describe(&self) -> String {
        match self {
            LedgerEvent::Transfer(t) => {
                format!("Transfer {} -> {} amount {}", t.from, t.to, t.amount)
            }
            LedgerEvent::Approval(a) => {
                format!("Approval {} -> {} limit {}", a.owner, a.spender, a.amount)
            }
        }
    }
}
