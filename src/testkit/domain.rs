//! Builders for domain values used across tests.
//!
//! The named instruments carry real source-venue rules so expected values
//! can be checked by hand.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::instrument::{
    Constraint, LotSizeConstraint, NotionalConstraint, PriceConstraint,
};
use crate::domain::{Instrument, MarketConfig};

pub fn price_filter(min_price: Decimal, max_price: Decimal, tick_size: Decimal) -> Constraint {
    Constraint::Price(PriceConstraint {
        min_price,
        max_price,
        tick_size,
    })
}

pub fn lot_size(min_quantity: Decimal) -> Constraint {
    Constraint::LotSize(LotSizeConstraint { min_quantity })
}

pub fn min_notional(min_notional: Decimal) -> Constraint {
    Constraint::MinNotional(NotionalConstraint { min_notional })
}

pub fn notional(min_notional: Decimal) -> Constraint {
    Constraint::Notional(NotionalConstraint { min_notional })
}

/// BNB/BTC: tick 0.000001, lot 0.001, notional 0.0001.
pub fn bnbbtc() -> Instrument {
    Instrument::new(
        "BNBBTC",
        "BNB",
        "BTC",
        8,
        vec![
            price_filter(dec!(0.00000100), dec!(100000.00000000), dec!(0.00000100)),
            lot_size(dec!(0.00100000)),
            min_notional(dec!(0.00010000)),
        ],
    )
}

/// BTC/USDT: tick 0.01, lot 0.00002, notional 10.
pub fn btcusdt() -> Instrument {
    Instrument::new(
        "BTCUSDT",
        "BTC",
        "USDT",
        8,
        vec![
            price_filter(dec!(0.01000000), dec!(1000000.00000000), dec!(0.01000000)),
            lot_size(dec!(0.00002000)),
            min_notional(dec!(10.00000000)),
        ],
    )
}

/// ETH/USDT: tick 0.01, lot 0.0001, notional 10.
pub fn ethusdt() -> Instrument {
    Instrument::new(
        "ETHUSDT",
        "ETH",
        "USDT",
        8,
        vec![
            price_filter(dec!(0.01000000), dec!(1000000.00000000), dec!(0.01000000)),
            lot_size(dec!(0.00010000)),
            min_notional(dec!(10.00000000)),
        ],
    )
}

/// A target market with explicit trading parameters.
pub fn market(
    base: &str,
    quote: &str,
    min_amount: Decimal,
    amount_precision: i32,
    price_precision: i32,
) -> MarketConfig {
    MarketConfig::new(base, quote)
        .with_price_limits(dec!(0.01), Decimal::ZERO)
        .with_amount(min_amount, amount_precision)
        .with_price_precision(price_precision)
}
