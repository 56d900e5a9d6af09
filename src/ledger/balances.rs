//! Balance sheet: holder address -> owned base units
//!
//! Absent accounts read as zero; a zero balance is the terminal state of an
//! account, not an error. All mutation goes through checked credit/debit.

use crate::account::Address;
use crate::ledger::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-holder balances for the ledger
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Balances: address -> base units
    balances: HashMap<Address, u128>,
}

impl BalanceSheet {
    /// Create an empty balance sheet
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Get the balance of an account. Accounts never credited hold zero.
    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Add `amount` to an account's balance
    pub(crate) fn credit(&mut self, account: &Address, amount: u128) -> Result<(), LedgerError> {
        let updated = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.balances.insert(*account, updated);
        Ok(())
    }

    /// Remove `amount` from an account's balance
    pub(crate) fn debit(&mut self, account: &Address, amount: u128) -> Result<(), LedgerError> {
        let have = self.balance_of(account);
        let remaining = have
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance { have, need: amount })?;
        self.balances.insert(*account, remaining);
        Ok(())
    }

    /// Get all accounts with a nonzero balance
    pub fn holders(&self) -> Vec<(&Address, &u128)> {
        self.balances.iter().filter(|(_, &b)| b > 0).collect()
    }

    /// Get the number of accounts with a nonzero balance
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|&&b| b > 0).count()
    }

    /// Checked sum of every balance on the sheet
    ///
    /// `None` means the sheet itself is inconsistent: a well-formed ledger
    /// can never hold more than the total supply in aggregate.
    pub fn circulating(&self) -> Option<u128> {
        self.balances
            .values()
            .try_fold(0u128, |acc, &balance| acc.checked_add(balance))
    }
}
