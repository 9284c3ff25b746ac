//! Currency withdrawal parameters on both venues.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

/// A currency as configured on the target venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetCurrency {
    pub code: String,
    pub withdraw_fee: Decimal,
    pub min_withdraw: Decimal,
}

impl TargetCurrency {
    pub fn new(code: impl Into<String>, withdraw_fee: Decimal, min_withdraw: Decimal) -> Self {
        Self {
            code: code.into(),
            withdraw_fee,
            min_withdraw,
        }
    }

    /// Coin code of the same currency on the source venue.
    #[must_use]
    pub fn source_code(&self) -> String {
        self.code.to_uppercase()
    }
}

/// Withdrawal parameters of one network carrying a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkRecord {
    pub name: String,
    pub withdraw_fee: Decimal,
    pub withdraw_min: Decimal,
}

impl NetworkRecord {
    pub fn new(name: impl Into<String>, withdraw_fee: Decimal, withdraw_min: Decimal) -> Self {
        Self {
            name: name.into(),
            withdraw_fee,
            withdraw_min,
        }
    }
}

/// A currency on the source venue, possibly available on several networks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCurrency {
    pub code: String,
    pub networks: Vec<NetworkRecord>,
}

impl SourceCurrency {
    pub fn new(code: impl Into<String>, networks: Vec<NetworkRecord>) -> Self {
        Self {
            code: code.into(),
            networks,
        }
    }
}

/// Index source currencies by coin code. Later duplicates replace earlier ones.
#[must_use]
pub fn index_by_code(currencies: &[SourceCurrency]) -> HashMap<&str, &SourceCurrency> {
    currencies.iter().map(|c| (c.code.as_str(), c)).collect()
}
