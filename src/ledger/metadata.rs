//! Token metadata (immutable after deployment)

use crate::ledger::error::LedgerError;
use serde::{Deserialize, Serialize};

/// Decimal precision of the ledger. Balances are tracked in base units of
/// 10^-18 tokens, the convention of the asset class this mirrors.
pub const DECIMALS: u8 = 18;

/// Number of base units in one whole token (10^18).
pub const UNITS_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Name, symbol, and precision of the token, fixed at deployment
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenMetadata {
    /// Token name (e.g., "My Token")
    pub name: String,
    /// Token symbol (e.g., "MTK")
    pub symbol: String,
    /// Decimal places, always [`DECIMALS`]
    pub decimals: u8,
}

impl TokenMetadata {
    /// Create new token metadata with validation
    pub fn new(name: String, symbol: String) -> Result<Self, LedgerError> {
        if name.is_empty() || name.len() > 50 {
            return Err(LedgerError::InvalidConstruction(
                "name must be 1-50 characters".to_string(),
            ));
        }

        if symbol.is_empty() || symbol.len() > 10 {
            return Err(LedgerError::InvalidConstruction(
                "symbol must be 1-10 characters".to_string(),
            ));
        }

        Ok(Self {
            name,
            symbol,
            decimals: DECIMALS,
        })
    }
}

/// Scale a whole-token amount into base units
///
/// Returns `None` if the scaled amount is not representable.
pub fn to_base_units(whole_tokens: u128) -> Option<u128> {
    whole_tokens.checked_mul(UNITS_PER_TOKEN)
}
