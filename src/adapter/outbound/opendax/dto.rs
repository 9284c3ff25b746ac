//! OpenDAX wire types.
//!
//! The platform sends decimals either as strings or as bare JSON numbers.
//! Numbers are read through serde_json's arbitrary-precision mode, so
//! neither form passes through a binary float.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{MarketConfig, TargetCurrency};

/// Market as returned by the public markets endpoint and by the admin
/// update endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketDto {
    pub symbol: String,
    pub name: String,
    pub base_unit: String,
    pub quote_unit: String,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub min_amount: Decimal,
    pub amount_precision: i32,
    pub price_precision: i32,
}

impl From<MarketDto> for MarketConfig {
    fn from(dto: MarketDto) -> Self {
        MarketConfig::new(&dto.base_unit, &dto.quote_unit)
            .with_identity(dto.symbol, dto.name)
            .with_price_limits(dto.min_price, dto.max_price)
            .with_amount(dto.min_amount, dto.amount_precision)
            .with_price_precision(dto.price_precision)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyDto {
    pub id: String,
    pub withdraw_fee: Decimal,
    pub min_withdraw_amount: Decimal,
}

impl From<CurrencyDto> for TargetCurrency {
    fn from(dto: CurrencyDto) -> Self {
        TargetCurrency::new(dto.id, dto.withdraw_fee, dto.min_withdraw_amount)
    }
}

/// Body of the admin secret update that restarts the matching engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateSecretRequest {
    pub key: String,
    pub scope: String,
    pub value: String,
}

impl UpdateSecretRequest {
    /// The `restart` secret in the `private` scope, stamped with `at`.
    #[must_use]
    pub fn restart(at: DateTime<Utc>) -> Self {
        Self {
            key: "restart".to_string(),
            scope: "private".to_string(),
            value: at.to_rfc3339(),
        }
    }
}
