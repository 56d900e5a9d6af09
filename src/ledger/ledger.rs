//! The ledger state machine
//!
//! A [`TokenLedger`] owns the balance sheet, the allowance sheet, and the
//! event history for a single fixed-supply token. The entire supply is
//! credited to the deployer at construction and only moves through
//! `transfer` / `transfer_from` afterwards.
//!
//! Every mutating operation is validate-then-commit: all arithmetic and
//! authorization checks are proven against current state before any cell is
//! written, so a failure leaves the ledger exactly as it was. The execution
//! model is strictly serial; callers needing concurrency must wrap the
//! instance itself.

use crate::account::Address;
use crate::ledger::allowances::AllowanceSheet;
use crate::ledger::balances::BalanceSheet;
use crate::ledger::error::LedgerError;
use crate::ledger::events::{ApprovalRecord, LedgerEvent, TransferRecord, MAX_EVENT_HISTORY};
use crate::ledger::metadata::{to_base_units, TokenMetadata};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A fixed-supply fungible token ledger
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenLedger {
    /// Name, symbol, and precision (immutable)
    metadata: TokenMetadata,
    /// Total issued base units, set exactly once at deployment
    total_supply: u128,
    /// Per-holder balances
    balances: BalanceSheet,
    /// Delegated spending limits
    allowances: AllowanceSheet,
    /// Observable history, appended to on successful commits only
    events: Vec<LedgerEvent>,
}

impl TokenLedger {
    /// Deploy a new ledger, crediting the whole supply to `deployer`
    ///
    /// `initial_supply` is given in whole tokens and scaled by the ledger's
    /// fixed decimal precision.
    pub fn deploy(
        name: &str,
        symbol: &str,
        initial_supply: u128,
        deployer: &Address,
    ) -> Result<Self, LedgerError> {
        let metadata = TokenMetadata::new(name.to_string(), symbol.to_string())?;

        if initial_supply == 0 {
            return Err(LedgerError::InvalidConstruction(
                "initial supply must be positive".to_string(),
            ));
        }

        if deployer.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }

        let total_supply = to_base_units(initial_supply).ok_or_else(|| {
            LedgerError::InvalidConstruction(format!(
                "initial supply of {} tokens is not representable",
                initial_supply
            ))
        })?;

        let mut balances = BalanceSheet::new();
        balances.credit(deployer, total_supply)?;

        log::info!(
            "Ledger deployed: {} ({}), supply {} base units, deployer {}",
            metadata.name,
            metadata.symbol,
            total_supply,
            deployer
        );

        Ok(Self {
            metadata,
            total_supply,
            balances,
            allowances: AllowanceSheet::new(),
            events: Vec::new(),
        })
    }

    // =========================================================================
    // View operations
    // =========================================================================

    /// Get the token name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Get the token symbol
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Get the decimal precision
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// Get the total issued supply in base units
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Get the balance of an account (zero for accounts never credited)
    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.balance_of(account)
    }

    /// Get the remaining limit `spender` may move on behalf of `owner`
    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances.allowance(owner, spender)
    }

    /// Get all accounts holding a nonzero balance
    pub fn holders(&self) -> Vec<(&Address, &u128)> {
        self.balances.holders()
    }

    /// Get the number of accounts holding a nonzero balance
    pub fn holder_count(&self) -> usize {
        self.balances.holder_count()
    }

    /// Get the observable event history, oldest first
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Check the conservation invariant: the sum of all balances equals the
    /// total issued supply
    pub fn verify_conservation(&self) -> bool {
        self.balances.circulating() == Some(self.total_supply)
    }

    // =========================================================================
    // Mutating operations
    // =========================================================================

    /// Move `amount` base units from `caller` to `to`
    pub fn transfer(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<TransferRecord, LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }

        // Prove both legs against current state before touching either cell.
        let have = self.balances.balance_of(caller);
        let debited = have
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance { have, need: amount })?;
        let recipient_base = if to == caller {
            // Self-transfer: the credit lands on the already-debited cell
            debited
        } else {
            self.balances.balance_of(to)
        };
        recipient_base
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        self.balances.debit(caller, amount)?;
        self.balances.credit(to, amount)?;

        log::debug!("Transfer {} -> {} amount {}", caller, to, amount);

        Ok(self.record_transfer(caller, to, amount))
    }

    /// Authorize `spender` to move up to `amount` base units on behalf of
    /// `caller`
    ///
    /// The limit is set to exactly `amount`, replacing any prior approval;
    /// zero revokes.
    pub fn approve(
        &mut self,
        caller: &Address,
        spender: &Address,
        amount: u128,
    ) -> Result<ApprovalRecord, LedgerError> {
        self.allowances.approve(caller, spender, amount);

        log::debug!("Approval {} -> {} limit {}", caller, spender, amount);

        let record = ApprovalRecord {
            owner: *caller,
            spender: *spender,
            amount,
            timestamp: Utc::now(),
        };
        self.push_event(LedgerEvent::Approval(record.clone()));
        Ok(record)
    }

    /// Move `amount` base units from `owner` to `to`, with `caller` acting
    /// as the spender of a prior approval
    ///
    /// The allowance cell and both balance cells are written only after
    /// every check has passed; any failure leaves all three exactly as they
    /// were.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        owner: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<TransferRecord, LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }

        let allowed = self.allowances.allowance(owner, caller);
        allowed
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAllowance {
                have: allowed,
                need: amount,
            })?;

        let have = self.balances.balance_of(owner);
        let debited = have
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance { have, need: amount })?;
        let recipient_base = if to == owner {
            debited
        } else {
            self.balances.balance_of(to)
        };
        recipient_base
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        self.allowances.consume(owner, caller, amount)?;
        self.balances.debit(owner, amount)?;
        self.balances.credit(to, amount)?;

        log::debug!(
            "Transfer {} -> {} amount {} (spender {})",
            owner,
            to,
            amount,
            caller
        );

        Ok(self.record_transfer(owner, to, amount))
    }

    fn record_transfer(&mut self, from: &Address, to: &Address, amount: u128) -> TransferRecord {
        let record = TransferRecord {
            from: *from,
            to: *to,
            amount,
            timestamp: Utc::now(),
        };
        self.push_event(LedgerEvent::Transfer(record.clone()));
        record
    }

    fn push_event(&mut self, event: LedgerEvent) {
        self.events.push(event);
        if self.events.len() > MAX_EVENT_HISTORY {
            self.events.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::metadata::UNITS_PER_TOKEN;

    fn addresses() -> (Address, Address, Address) {
        (
            Address::derive(b"alice"),
            Address::derive(b"bob"),
            Address::derive(b"carol"),
        )
    }

    fn deploy_test_ledger() -> (TokenLedger, Address) {
        let deployer = Address::derive(b"alice");
        let ledger = TokenLedger::deploy("new", "token", 10_000, &deployer).unwrap();
        (ledger, deployer)
    }

    #[test]
    fn test_deploy_credits_initial_supply_to_deployer() {
        let (ledger, deployer) = deploy_test_ledger();
        assert_eq!(ledger.balance_of(&deployer), 10_000 * UNITS_PER_TOKEN);
    }

    #[test]
    fn test_deploy_creates_fixed_total_supply() {
        let (ledger, _) = deploy_test_ledger();
        assert_eq!(ledger.total_supply(), 10_000 * UNITS_PER_TOKEN);
        assert_eq!(ledger.holder_count(), 1);
    }

    #[test]
    fn test_deploy_sets_name_and_symbol() {
        let (ledger, _) = deploy_test_ledger();
        assert_eq!(ledger.name(), "new");
        assert_eq!(ledger.symbol(), "token");
        assert_eq!(ledger.decimals(), 18);
    }

    #[test]
    fn test_deploy_rejects_zero_supply() {
        let deployer = Address::derive(b"alice");
        let result = TokenLedger::deploy("new", "token", 0, &deployer);
        assert!(matches!(result, Err(LedgerError::InvalidConstruction(_))));
    }

    #[test]
    fn test_deploy_rejects_unrepresentable_supply() {
        let deployer = Address::derive(b"alice");
        let result = TokenLedger::deploy("new", "token", u128::MAX, &deployer);
        assert!(matches!(result, Err(LedgerError::InvalidConstruction(_))));
    }

    #[test]
    fn test_deploy_rejects_null_deployer() {
        let result = TokenLedger::deploy("new", "token", 10_000, &Address::ZERO);
        assert!(matches!(result, Err(LedgerError::InvalidRecipient)));
    }

    #[test]
    fn test_transfer_moves_the_right_amount() {
        let (mut ledger, alice) = deploy_test_ledger();
        let bob = Address::derive(b"bob");

        ledger.transfer(&alice, &bob, 500 * UNITS_PER_TOKEN).unwrap();

        assert_eq!(ledger.balance_of(&alice), 9_500 * UNITS_PER_TOKEN);
        assert_eq!(ledger.balance_of(&bob), 500 * UNITS_PER_TOKEN);
        assert_eq!(ledger.total_supply(), 10_000 * UNITS_PER_TOKEN);
    }

    #[test]
    fn test_transfer_insufficient_balance_leaves_state_untouched() {
        let (mut ledger, alice) = deploy_test_ledger();
        let bob = Address::derive(b"bob");

        let result = ledger.transfer(&bob, &alice, 1);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { have: 0, need: 1 })
        ));

        assert_eq!(ledger.balance_of(&alice), 10_000 * UNITS_PER_TOKEN);
        assert_eq!(ledger.balance_of(&bob), 0);
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_transfer_to_null_address_rejected() {
        let (mut ledger, alice) = deploy_test_ledger();

        let result = ledger.transfer(&alice, &Address::ZERO, 1);
        assert!(matches!(result, Err(LedgerError::InvalidRecipient)));
        assert_eq!(ledger.balance_of(&alice), 10_000 * UNITS_PER_TOKEN);
    }

    #[test]
    fn test_zero_amount_transfer_is_a_legal_noop() {
        let (mut ledger, alice) = deploy_test_ledger();
        let bob = Address::derive(b"bob");

        ledger.transfer(&alice, &bob, 0).unwrap();

        assert_eq!(ledger.balance_of(&alice), 10_000 * UNITS_PER_TOKEN);
        assert_eq!(ledger.balance_of(&bob), 0);
        assert_eq!(ledger.events().len(), 1);
    }

    #[test]
    fn test_self_transfer_preserves_balance() {
        let (mut ledger, alice) = deploy_test_ledger();

        ledger.transfer(&alice, &alice, 500 * UNITS_PER_TOKEN).unwrap();

        assert_eq!(ledger.balance_of(&alice), 10_000 * UNITS_PER_TOKEN);
        assert!(ledger.verify_conservation());
    }

    #[test]
    fn test_approve_sets_allowance() {
        let (mut ledger, alice) = deploy_test_ledger();
        let bob = Address::derive(b"bob");

        ledger.approve(&alice, &bob, 10_000 * UNITS_PER_TOKEN).unwrap();

        assert_eq!(ledger.allowance(&alice, &bob), 10_000 * UNITS_PER_TOKEN);
    }

    #[test]
    fn test_approve_overwrites_prior_value() {
        let (mut ledger, alice) = deploy_test_ledger();
        let bob = Address::derive(b"bob");

        ledger.approve(&alice, &bob, 10_000).unwrap();
        ledger.approve(&alice, &bob, 3_000).unwrap();

        // Exactly the second value, not the sum
        assert_eq!(ledger.allowance(&alice, &bob), 3_000);
    }

    #[test]
    fn test_transfer_from_without_allowance_fails() {
        let (mut ledger, alice) = deploy_test_ledger();
        let bob = Address::derive(b"bob");

        let result = ledger.transfer_from(&bob, &alice, &bob, 10_000);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientAllowance {
                have: 0,
                need: 10_000
            })
        ));

        // No cell moved
        assert_eq!(ledger.balance_of(&alice), 10_000 * UNITS_PER_TOKEN);
        assert_eq!(ledger.balance_of(&bob), 0);
        assert_eq!(ledger.allowance(&alice, &bob), 0);
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_transfer_from_with_allowance_moves_tokens() {
        let (mut ledger, alice) = deploy_test_ledger();
        let bob = Address::derive(b"bob");

        ledger.approve(&alice, &bob, 10_000 * UNITS_PER_TOKEN).unwrap();
        ledger
            .transfer_from(&bob, &alice, &bob, 500 * UNITS_PER_TOKEN)
            .unwrap();

        assert_eq!(ledger.balance_of(&bob), 500 * UNITS_PER_TOKEN);
        assert_eq!(ledger.balance_of(&alice), 9_500 * UNITS_PER_TOKEN);
    }

    #[test]
    fn test_transfer_from_decreases_allowance_exactly() {
        let (mut ledger, alice) = deploy_test_ledger();
        let bob = Address::derive(b"bob");

        ledger.approve(&alice, &bob, 10_000 * UNITS_PER_TOKEN).unwrap();
        ledger
            .transfer_from(&bob, &alice, &bob, 500 * UNITS_PER_TOKEN)
            .unwrap();

        assert_eq!(ledger.allowance(&alice, &bob), 9_500 * UNITS_PER_TOKEN);
    }

    #[test]
    fn test_transfer_from_insufficient_balance_consumes_nothing() {
        let (mut ledger, alice) = deploy_test_ledger();
        let (_, bob, carol) = addresses();

        // Bob is approved for more than Alice actually holds
        let too_much = 20_000 * UNITS_PER_TOKEN;
        ledger.approve(&alice, &bob, too_much).unwrap();

        let result = ledger.transfer_from(&bob, &alice, &carol, too_much);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));

        // The allowance must not have been consumed on the failed path
        assert_eq!(ledger.allowance(&alice, &bob), too_much);
        assert_eq!(ledger.balance_of(&alice), 10_000 * UNITS_PER_TOKEN);
        assert_eq!(ledger.balance_of(&carol), 0);
    }

    #[test]
    fn test_transfer_from_to_null_address_rejected() {
        let (mut ledger, alice) = deploy_test_ledger();
        let bob = Address::derive(b"bob");

        ledger.approve(&alice, &bob, 1_000).unwrap();
        let result = ledger.transfer_from(&bob, &alice, &Address::ZERO, 100);

        assert!(matches!(result, Err(LedgerError::InvalidRecipient)));
        assert_eq!(ledger.allowance(&alice, &bob), 1_000);
    }

    #[test]
    fn test_conservation_holds_across_operation_sequences() {
        let (mut ledger, alice) = deploy_test_ledger();
        let (_, bob, carol) = addresses();

        ledger.transfer(&alice, &bob, 2_500 * UNITS_PER_TOKEN).unwrap();
        ledger.approve(&bob, &carol, 1_000 * UNITS_PER_TOKEN).unwrap();
        ledger
            .transfer_from(&carol, &bob, &carol, 700 * UNITS_PER_TOKEN)
            .unwrap();
        ledger.transfer(&carol, &alice, 200 * UNITS_PER_TOKEN).unwrap();

        // Failed operations must not disturb the invariant either
        let whole_supply = ledger.total_supply();
        let _ = ledger.transfer(&bob, &carol, whole_supply);
        let _ = ledger.transfer_from(&carol, &bob, &alice, 1_000 * UNITS_PER_TOKEN);

        assert!(ledger.verify_conservation());
        assert_eq!(
            ledger.balance_of(&alice) + ledger.balance_of(&bob) + ledger.balance_of(&carol),
            ledger.total_supply()
        );
    }

    #[test]
    fn test_reads_are_idempotent() {
        let (mut ledger, alice) = deploy_test_ledger();
        let bob = Address::derive(b"bob");
        ledger.approve(&alice, &bob, 42).unwrap();

        assert_eq!(ledger.balance_of(&alice), ledger.balance_of(&alice));
        assert_eq!(
            ledger.allowance(&alice, &bob),
            ledger.allowance(&alice, &bob)
        );
        assert_eq!(ledger.total_supply(), ledger.total_supply());
    }

    #[test]
    fn test_events_record_successful_operations() {
        let (mut ledger, alice) = deploy_test_ledger();
        let bob = Address::derive(b"bob");

        ledger.approve(&alice, &bob, 1_000).unwrap();
        ledger.transfer(&alice, &bob, 250).unwrap();
        ledger.transfer_from(&bob, &alice, &bob, 750).unwrap();

        let events = ledger.events();
        assert_eq!(events.len(), 3);

        match &events[0] {
            LedgerEvent::Approval(a) => {
                assert_eq!(a.owner, alice);
                assert_eq!(a.spender, bob);
                assert_eq!(a.amount, 1_000);
            }
            other => panic!("expected approval, got {:?}", other),
        }

        match &events[1] {
            LedgerEvent::Transfer(t) => {
                assert_eq!(t.from, alice);
                assert_eq!(t.to, bob);
                assert_eq!(t.amount, 250);
            }
            other => panic!("expected transfer, got {:?}", other),
        }

        match &events[2] {
            LedgerEvent::Transfer(t) => {
                assert_eq!(t.from, alice);
                assert_eq!(t.amount, 750);
            }
            other => panic!("expected transfer, got {:?}", other),
        }
    }

    #[test]
    fn test_event_history_is_bounded() {
        let (mut ledger, alice) = deploy_test_ledger();
        let bob = Address::derive(b"bob");

        for _ in 0..(MAX_EVENT_HISTORY + 10) {
            ledger.transfer(&alice, &bob, 0).unwrap();
        }

        assert_eq!(ledger.events().len(), MAX_EVENT_HISTORY);
    }

    #[test]
    fn test_ledger_round_trips_through_json() {
        let (mut ledger, alice) = deploy_test_ledger();
        let bob = Address::derive(b"bob");
        ledger.transfer(&alice, &bob, 500 * UNITS_PER_TOKEN).unwrap();
        ledger.approve(&alice, &bob, 123).unwrap();

        let json = serde_json::to_string(&ledger).unwrap();
        let restored: TokenLedger = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.name(), ledger.name());
        assert_eq!(restored.total_supply(), ledger.total_supply());
        assert_eq!(restored.balance_of(&bob), 500 * UNITS_PER_TOKEN);
        assert_eq!(restored.allowance(&alice, &bob), 123);
        assert_eq!(restored.events().len(), ledger.events().len());
        assert!(restored.verify_conservation());
    }
}
