//! Allowance sheet: (owner, spender) -> remaining spend limit
//!
//! An approval sets the limit to an exact value (never additive); consuming
//! it subtracts with checked arithmetic. Absent pairs read as zero.

use crate::account::Address;
use crate::ledger::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Delegated spending limits for the ledger
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AllowanceSheet {
    /// Allowances: owner -> (spender -> remaining limit)
    allowances: HashMap<Address, HashMap<Address, u128>>,
}

impl AllowanceSheet {
    /// Create an empty allowance sheet
    pub fn new() -> Self {
        Self {
            allowances: HashMap::new(),
        }
    }

    /// Get the remaining limit `spender` may move on behalf of `owner`
    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Set the (owner, spender) limit to exactly `amount`
    ///
    /// Overwrites any prior value; zero revokes the approval.
    pub(crate) fn approve(&mut self, owner: &Address, spender: &Address, amount: u128) {
        self.allowances
            .entry(*owner)
            .or_default()
            .insert(*spender, amount);
    }

    /// Spend `amount` of the (owner, spender) limit
    pub(crate) fn consume(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let have = self.allowance(owner, spender);
        let remaining = have
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAllowance { have, need: amount })?;

        self.allowances
            .entry(*owner)
            .or_default()
            .insert(*spender, remaining);

        Ok(())
    }
}
