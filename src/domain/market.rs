//! Target-venue market configuration.
//!
//! - [`MarketConfig`] - Market parameters as the target venue stores them
//! - [`equivalent`] - Whether two configurations differ in an update-worthy way
//! - [`UpdateMarketRequest`] - The write issued when they do

use rust_decimal::Decimal;
use serde::Serialize;

/// Market parameters on the target venue.
///
/// Built once per reconciliation pass and never modified afterwards; the
/// `with_*` methods consume the value and are only used while constructing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketConfig {
    symbol: String,
    name: String,
    base_unit: String,
    quote_unit: String,
    min_price: Decimal,
    max_price: Decimal,
    min_amount: Decimal,
    amount_precision: i32,
    price_precision: i32,
}

impl MarketConfig {
    /// Create a market for the given pair with zeroed limits and precisions.
    ///
    /// The symbol is `lower(base + quote)` and the name `BASE/QUOTE`.
    pub fn new(base_unit: &str, quote_unit: &str) -> Self {
        Self {
            symbol: format!("{base_unit}{quote_unit}").to_lowercase(),
            name: format!("{}/{}", base_unit.to_uppercase(), quote_unit.to_uppercase()),
            base_unit: base_unit.to_lowercase(),
            quote_unit: quote_unit.to_lowercase(),
            min_price: Decimal::ZERO,
            max_price: Decimal::ZERO,
            min_amount: Decimal::ZERO,
            amount_precision: 0,
            price_precision: 0,
        }
    }

    /// Replace the derived symbol and name with the ones a venue reported.
    #[must_use]
    pub fn with_identity(mut self, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_price_limits(mut self, min_price: Decimal, max_price: Decimal) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    #[must_use]
    pub fn with_amount(mut self, min_amount: Decimal, amount_precision: i32) -> Self {
        self.min_amount = min_amount;
        self.amount_precision = amount_precision;
        self
    }

    #[must_use]
    pub fn with_price_precision(mut self, price_precision: i32) -> Self {
        self.price_precision = price_precision;
        self
    }

    /// Target-venue symbol, e.g. `bnbbtc`.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Display name, e.g. `BNB/BTC`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn base_unit(&self) -> &str {
        &self.base_unit
    }

    #[must_use]
    pub fn quote_unit(&self) -> &str {
        &self.quote_unit
    }

    #[must_use]
    pub const fn min_price(&self) -> Decimal {
        self.min_price
    }

    /// Zero means the market has no upper price bound.
    #[must_use]
    pub const fn max_price(&self) -> Decimal {
        self.max_price
    }

    #[must_use]
    pub const fn min_amount(&self) -> Decimal {
        self.min_amount
    }

    /// May be negative for amounts stepped in tens or more.
    #[must_use]
    pub const fn amount_precision(&self) -> i32 {
        self.amount_precision
    }

    #[must_use]
    pub const fn price_precision(&self) -> i32 {
        self.price_precision
    }

    /// Symbol of the same pair on the source venue, e.g. `BNBBTC`.
    #[must_use]
    pub fn source_symbol(&self) -> String {
        format!("{}{}", self.base_unit, self.quote_unit).to_uppercase()
    }

    /// See [`equivalent`].
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        equivalent(self, other)
    }
}

/// True when `a` and `b` agree on both precisions and the minimum amount.
///
/// Amounts compare by value, so `11` equals `11.0`. Symbol, name and price
/// limits are not compared: drift there does not warrant a write.
#[must_use]
pub fn equivalent(a: &MarketConfig, b: &MarketConfig) -> bool {
    a.amount_precision == b.amount_precision
        && a.price_precision == b.price_precision
        && a.min_amount == b.min_amount
}

/// Market update submitted to the target venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateMarketRequest {
    pub symbol: String,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub min_amount: Decimal,
    pub amount_precision: i32,
    pub price_precision: i32,
}

impl UpdateMarketRequest {
    /// Request that brings the market `symbol` in line with `proposed`.
    #[must_use]
    pub fn new(symbol: impl Into<String>, proposed: &MarketConfig) -> Self {
        Self {
            symbol: symbol.into(),
            min_price: proposed.min_price,
            max_price: proposed.max_price,
            min_amount: proposed.min_amount,
            amount_precision: proposed.amount_precision,
            price_precision: proposed.price_precision,
        }
    }
}
